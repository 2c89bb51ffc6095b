use std::panic;
use std::thread;

use super::{
    CheckContext, CheckKind, CheckLogger, CheckOptions, CheckResult, FailAction, SmtpReply,
    require_matching_ehlo, require_matching_rdns, require_mx_record,
};
use crate::resolver::Resolver;
use crate::session::ConnectionMetadata;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub check: CheckKind,
    pub action: FailAction,
    pub result: CheckResult,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "verdict", rename_all = "lowercase"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Quarantine { checks: Vec<CheckKind> },
    Reject { reply: SmtpReply },
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct SuiteReport {
    pub outcomes: Vec<CheckOutcome>,
    pub verdict: Verdict,
}

/// Runs the three sender checks for one message and folds their results.
#[derive(Debug, Clone, Default)]
pub struct CheckSuite {
    options: CheckOptions,
}

impl CheckSuite {
    pub fn new(options: CheckOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Checks run concurrently; they share only the connection's rDNS future.
    pub fn run<R>(&self, resolver: &R, conn: &ConnectionMetadata, mail_from: &str) -> SuiteReport
    where
        R: Resolver + ?Sized,
    {
        let rdns_logger = CheckLogger::for_check(CheckKind::MatchingRdns);
        let mx_logger = CheckLogger::for_check(CheckKind::MxRecord);
        let ehlo_logger = CheckLogger::for_check(CheckKind::MatchingEhlo);

        let (rdns, mx, ehlo) = thread::scope(|scope| {
            let rdns = scope.spawn(|| {
                require_matching_rdns(&CheckContext::new(resolver, conn, &rdns_logger))
            });
            let mx = scope.spawn(|| {
                require_mx_record(&CheckContext::new(resolver, conn, &mx_logger), mail_from)
            });
            let ehlo = require_matching_ehlo(&CheckContext::new(resolver, conn, &ehlo_logger));
            (
                rdns.join().unwrap_or_else(|payload| panic::resume_unwind(payload)),
                mx.join().unwrap_or_else(|payload| panic::resume_unwind(payload)),
                ehlo,
            )
        });

        let outcomes: Vec<CheckOutcome> = [
            (CheckKind::MatchingRdns, rdns),
            (CheckKind::MxRecord, mx),
            (CheckKind::MatchingEhlo, ehlo),
        ]
        .into_iter()
        .map(|(check, result)| CheckOutcome {
            check,
            action: self.options.action(check),
            result,
        })
        .collect();

        let verdict = fold_verdict(&outcomes);
        tracing::debug!(?verdict, "sender checks done");
        SuiteReport { outcomes, verdict }
    }
}

/// Permanent rejections win over temporary ones, which win over quarantine.
pub(crate) fn fold_verdict(outcomes: &[CheckOutcome]) -> Verdict {
    let mut temporary: Option<SmtpReply> = None;
    let mut quarantined = Vec::new();

    for outcome in outcomes {
        let Some(failure) = outcome.result.failure() else {
            continue;
        };
        match outcome.action {
            FailAction::Ignore => {}
            FailAction::Quarantine => quarantined.push(outcome.check),
            FailAction::Reject if failure.is_temporary() => {
                temporary.get_or_insert_with(|| failure.smtp_reply());
            }
            FailAction::Reject => {
                return Verdict::Reject {
                    reply: failure.smtp_reply(),
                };
            }
        }
    }

    if let Some(reply) = temporary {
        Verdict::Reject { reply }
    } else if !quarantined.is_empty() {
        Verdict::Quarantine {
            checks: quarantined,
        }
    } else {
        Verdict::Accept
    }
}

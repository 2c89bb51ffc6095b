use std::borrow::Cow;

use super::{CheckKind, CheckResult, FailureKind};
use crate::resolver::DnsError;

/// Logger handed to a check through its context.
///
/// Every event carries a `check` field with the name given at construction.
/// Logging never influences the verdict.
#[derive(Debug, Clone)]
pub struct CheckLogger {
    check: Cow<'static, str>,
}

impl CheckLogger {
    pub fn new(check: impl Into<Cow<'static, str>>) -> Self {
        Self {
            check: check.into(),
        }
    }

    pub fn for_check(kind: CheckKind) -> Self {
        Self::new(kind.name())
    }

    pub fn name(&self) -> &str {
        &self.check
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!(check = %self.check, "{message}");
    }

    pub fn dns_error(&self, message: &str, err: &DnsError) {
        if err.is_transient() {
            tracing::warn!(check = %self.check, error = %err, transient = true, "{message}");
        } else {
            tracing::debug!(check = %self.check, error = %err, transient = false, "{message}");
        }
    }

    pub fn verdict(&self, result: &CheckResult) {
        match result {
            CheckResult::Pass => tracing::debug!(check = %self.check, "check passed"),
            CheckResult::Fail(failure) => match failure.kind {
                FailureKind::Permanent => {
                    tracing::info!(check = %self.check, reason = failure.reason, "check failed")
                }
                FailureKind::Temporary => tracing::warn!(
                    check = %self.check,
                    reason = failure.reason,
                    "check failed, resolver fault"
                ),
            },
        }
    }
}

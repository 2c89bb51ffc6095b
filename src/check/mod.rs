//! Sender checks run by the SMTP framework before accepting a message.
//!
//! Each check takes a [`CheckContext`] and returns a [`CheckResult`]. DNS and
//! parsing errors never escape a check: they become a failure carrying a
//! reason, and the resolver error is kept so the framework can tell a
//! temporary condition from a permanent one.

mod ehlo;
mod logger;
mod mx;
mod options;
mod rdns;
mod suite;
mod types;

pub use ehlo::require_matching_ehlo;
pub use logger::CheckLogger;
pub use mx::require_mx_record;
pub use options::{CheckOptions, FailAction, UnknownFailAction};
pub use rdns::require_matching_rdns;
pub use suite::{CheckOutcome, CheckSuite, SuiteReport, Verdict};
pub use types::{CheckFailure, CheckKind, CheckResult, EnhancedCode, FailureKind, SmtpReply};

use crate::resolver::Resolver;
use crate::session::ConnectionMetadata;

/// Everything a check may consult for one invocation.
pub struct CheckContext<'a, R: ?Sized> {
    pub resolver: &'a R,
    pub conn: &'a ConnectionMetadata,
    pub logger: &'a CheckLogger,
}

impl<'a, R> CheckContext<'a, R>
where
    R: Resolver + ?Sized,
{
    pub fn new(resolver: &'a R, conn: &'a ConnectionMetadata, logger: &'a CheckLogger) -> Self {
        Self {
            resolver,
            conn,
            logger,
        }
    }
}

#[cfg(test)]
mod tests;

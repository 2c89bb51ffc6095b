use std::fmt;
use std::str::FromStr;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use super::CheckKind;

/// What the framework does with a failed check.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailAction {
    /// Log only.
    Ignore,
    Quarantine,
    #[default]
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFailAction(pub String);

impl fmt::Display for UnknownFailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown fail action '{}', use: ignore|quarantine|reject", self.0)
    }
}

impl std::error::Error for UnknownFailAction {}

impl FromStr for FailAction {
    type Err = UnknownFailAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "quarantine" => Ok(Self::Quarantine),
            "reject" => Ok(Self::Reject),
            _ => Err(UnknownFailAction(s.to_string())),
        }
    }
}

/// Per-check configuration for [`CheckSuite`](super::CheckSuite).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckOptions {
    pub matching_rdns: FailAction,
    pub mx_record: FailAction,
    pub matching_ehlo: FailAction,
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, check: CheckKind, action: FailAction) -> Self {
        match check {
            CheckKind::MatchingRdns => self.matching_rdns = action,
            CheckKind::MxRecord => self.mx_record = action,
            CheckKind::MatchingEhlo => self.matching_ehlo = action,
        }
        self
    }

    pub fn action(&self, check: CheckKind) -> FailAction {
        match check {
            CheckKind::MatchingRdns => self.matching_rdns,
            CheckKind::MxRecord => self.mx_record,
            CheckKind::MatchingEhlo => self.matching_ehlo,
        }
    }
}

use std::fmt;

use crate::resolver::DnsError;

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    MatchingRdns,
    MxRecord,
    MatchingEhlo,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [Self::MatchingRdns, Self::MxRecord, Self::MatchingEhlo];

    pub fn name(&self) -> &'static str {
        match self {
            Self::MatchingRdns => "require_matching_rdns",
            Self::MxRecord => "require_mx_record",
            Self::MatchingEhlo => "require_matching_ehlo",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether retrying later may change the outcome.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Permanent,
    /// Caused by a resolver fault (timeout, SERVFAIL, network error).
    Temporary,
}

/// RFC 3463 enhanced status code.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancedCode {
    pub class: u8,
    pub subject: u16,
    pub detail: u16,
}

impl EnhancedCode {
    pub const fn new(class: u8, subject: u16, detail: u16) -> Self {
        Self {
            class,
            subject,
            detail,
        }
    }

    /// 4.4.3 Directory server failure.
    pub const DIRECTORY_FAILURE: Self = Self::new(4, 4, 3);
}

impl fmt::Display for EnhancedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.class, self.subject, self.detail)
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpReply {
    pub code: u16,
    pub enhanced: EnhancedCode,
    pub message: String,
}

impl SmtpReply {
    pub fn is_temporary(&self) -> bool {
        (400..500).contains(&self.code)
    }
}

impl fmt::Display for SmtpReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.code, self.enhanced, self.message)
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[derive(Debug, Clone)]
pub struct CheckFailure {
    pub check: CheckKind,
    pub reason: &'static str,
    pub kind: FailureKind,
    /// Code used for a permanent rejection.
    pub enhanced: EnhancedCode,
    /// Resolver error behind the failure, kept for the framework.
    #[cfg_attr(feature = "with-serde", serde(serialize_with = "serialize_error"))]
    pub error: Option<DnsError>,
}

impl CheckFailure {
    pub(crate) fn permanent(
        check: CheckKind,
        reason: &'static str,
        enhanced: EnhancedCode,
    ) -> Self {
        Self {
            check,
            reason,
            kind: FailureKind::Permanent,
            enhanced,
            error: None,
        }
    }

    pub(crate) fn from_dns(
        check: CheckKind,
        reason: &'static str,
        enhanced: EnhancedCode,
        error: DnsError,
    ) -> Self {
        let kind = if error.is_transient() {
            FailureKind::Temporary
        } else {
            FailureKind::Permanent
        };
        Self {
            check,
            reason,
            kind,
            enhanced,
            error: Some(error),
        }
    }

    pub fn is_temporary(&self) -> bool {
        self.kind == FailureKind::Temporary
    }

    /// SMTP reply a framework would send for this failure.
    pub fn smtp_reply(&self) -> SmtpReply {
        match self.kind {
            FailureKind::Permanent => SmtpReply {
                code: 550,
                enhanced: self.enhanced,
                message: self.reason.to_string(),
            },
            FailureKind::Temporary => SmtpReply {
                code: 451,
                enhanced: EnhancedCode::DIRECTORY_FAILURE,
                message: format!("{}, try again later", self.reason),
            },
        }
    }
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.check, self.reason)?;
        if let Some(err) = &self.error {
            write!(f, " ({err})")?;
        }
        Ok(())
    }
}

#[cfg(feature = "with-serde")]
fn serialize_error<S>(error: &Option<DnsError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_some(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "with-serde",
    serde(tag = "status", content = "failure", rename_all = "lowercase")
)]
#[derive(Debug, Clone)]
pub enum CheckResult {
    Pass,
    Fail(CheckFailure),
}

impl CheckResult {
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    pub fn failure(&self) -> Option<&CheckFailure> {
        match self {
            Self::Pass => None,
            Self::Fail(failure) => Some(failure),
        }
    }

    pub fn reason(&self) -> Option<&'static str> {
        self.failure().map(|failure| failure.reason)
    }
}

impl From<CheckFailure> for CheckResult {
    fn from(failure: CheckFailure) -> Self {
        Self::Fail(failure)
    }
}

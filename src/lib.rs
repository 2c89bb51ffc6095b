#![forbid(unsafe_code)]
//! sendercheck_lib — DNS checks on the SMTP sender (rDNS, MX, EHLO)

pub mod check;
pub mod future;
pub mod hostname;
pub mod resolver;
pub mod session;

pub use check::{
    CheckContext, CheckFailure, CheckKind, CheckLogger, CheckOptions, CheckOutcome, CheckResult,
    CheckSuite, EnhancedCode, FailAction, FailureKind, SmtpReply, SuiteReport, Verdict,
    require_matching_ehlo, require_matching_rdns, require_mx_record,
};
pub use future::{RdnsFuture, SingleAssignment};
pub use hostname::{
    AddressLiteral, format_address_literal, is_valid_dns_name, parse_address_literal,
    strip_root_dot,
};
pub use resolver::{
    DnsError, MxRecord, Resolver, ResolverOptions, SystemResolver, Zone, ZoneResolver,
};
pub use session::{ConnectionMetadata, lookup_rdns_name, spawn_rdns_lookup};

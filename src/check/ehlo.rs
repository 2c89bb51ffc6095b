use std::net::IpAddr;

use super::{CheckContext, CheckFailure, CheckKind, CheckResult, EnhancedCode};
use crate::hostname::{AddressLiteral, is_valid_dns_name, parse_address_literal, strip_root_dot};
use crate::resolver::Resolver;

const INVALID_LITERAL: &str = "invalid address literal in greeting";
const LITERAL_MISMATCH: &str = "address literal does not match connection address";
const NOT_RESOLVING: &str = "greeting hostname does not resolve";
const ADDRESS_MISMATCH: &str = "greeting hostname does not resolve to connection address";

/// 5.7.1 Delivery not authorized.
const NOT_AUTHORIZED: EnhancedCode = EnhancedCode::new(5, 7, 1);

/// Require the EHLO/HELO name to designate the connecting address.
///
/// A literal must equal the peer address. A domain must have both its A and
/// AAAA sets resolvable, and the set matching the peer's family must contain
/// the peer address.
pub fn require_matching_ehlo<R>(ctx: &CheckContext<'_, R>) -> CheckResult
where
    R: Resolver + ?Sized,
{
    let result = evaluate(ctx);
    ctx.logger.verdict(&result);
    result
}

fn evaluate<R>(ctx: &CheckContext<'_, R>) -> CheckResult
where
    R: Resolver + ?Sized,
{
    let hostname = ctx.conn.hostname();
    // v4-mapped peers on dual-stack sockets compare as IPv4
    let remote = ctx.conn.remote_ip().to_canonical();

    match parse_address_literal(hostname) {
        AddressLiteral::Malformed => return fail(INVALID_LITERAL),
        AddressLiteral::Address(addr) if addr.to_canonical() == remote => {
            return CheckResult::Pass;
        }
        AddressLiteral::Address(_) => return fail(LITERAL_MISMATCH),
        AddressLiteral::NotLiteral => {}
    }

    let name = strip_root_dot(hostname);
    if !is_valid_dns_name(name) {
        ctx.logger.debug(&format!("{hostname:?} is not a valid DNS name"));
        return fail(NOT_RESOLVING);
    }

    let (a, aaaa) = match (ctx.resolver.lookup_ipv4(name), ctx.resolver.lookup_ipv6(name)) {
        (Ok(a), Ok(aaaa)) => (a, aaaa),
        (Err(err), _) | (_, Err(err)) => {
            ctx.logger.dns_error("forward lookup of greeting hostname failed", &err);
            return CheckFailure::from_dns(
                CheckKind::MatchingEhlo,
                NOT_RESOLVING,
                NOT_AUTHORIZED,
                err,
            )
            .into();
        }
    };

    let found = match remote {
        IpAddr::V4(ip) => a.contains(&ip),
        IpAddr::V6(ip) => aaaa.contains(&ip),
    };

    if found {
        CheckResult::Pass
    } else {
        ctx.logger.debug(&format!("{remote} not among the addresses of {name}"));
        fail(ADDRESS_MISMATCH)
    }
}

fn fail(reason: &'static str) -> CheckResult {
    CheckFailure::permanent(CheckKind::MatchingEhlo, reason, NOT_AUTHORIZED).into()
}

use super::{CheckContext, CheckFailure, CheckKind, CheckResult, EnhancedCode};
use crate::hostname::{names_match, parse_address_literal, strip_root_dot};
use crate::resolver::Resolver;

const LITERAL_PEER: &str = "peer used an address literal, cannot match against reverse DNS";
const NO_RDNS: &str = "no usable reverse DNS record";
const MISMATCH: &str = "reverse DNS name does not match announced hostname";

/// 5.7.25 Reverse DNS validation failed (RFC 7372).
const RDNS_FAILED: EnhancedCode = EnhancedCode::new(5, 7, 25);

/// Compare the peer's PTR name with the name it announced.
///
/// Waits for the connection's reverse lookup; no query is issued here.
pub fn require_matching_rdns<R>(ctx: &CheckContext<'_, R>) -> CheckResult
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
    let rdns = ctx.conn.rdns().get();
    let hostname = ctx.conn.hostname();

    if parse_address_literal(hostname).is_literal() {
        return fail(LITERAL_PEER);
    }

    let ptr = match rdns {
        Ok(Some(name)) if !strip_root_dot(&name).is_empty() => name,
        Ok(_) => return fail(NO_RDNS),
        Err(err) => {
            ctx.logger.dns_error("reverse lookup failed", &err);
            return CheckFailure::from_dns(CheckKind::MatchingRdns, NO_RDNS, RDNS_FAILED, err)
                .into();
        }
    };

    if strip_root_dot(hostname).is_empty() {
        return fail(MISMATCH);
    }

    if names_match(&ptr, hostname) {
        CheckResult::Pass
    } else {
        ctx.logger.debug(&format!("PTR {ptr} != announced {hostname}"));
        fail(MISMATCH)
    }
}

fn fail(reason: &'static str) -> CheckResult {
    CheckFailure::permanent(CheckKind::MatchingRdns, reason, RDNS_FAILED).into()
}

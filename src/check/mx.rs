use super::{CheckContext, CheckFailure, CheckKind, CheckResult, EnhancedCode};
use crate::hostname::{is_valid_dns_name, parse_address_literal, strip_root_dot};
use crate::resolver::Resolver;

const MALFORMED_SENDER: &str = "malformed envelope sender";
const LITERAL_DOMAIN: &str = "envelope sender domain is an address literal";
const NO_DOMAIN: &str = "sender domain does not exist";
const LOOKUP_FAILED: &str = "MX lookup for sender domain failed";
const NO_MX: &str = "no MX records for sender domain";
const NULL_MX: &str = "sender domain explicitly declines mail (null MX)";

/// 5.1.7 Bad sender's mailbox address syntax.
const BAD_SENDER_SYNTAX: EnhancedCode = EnhancedCode::new(5, 1, 7);
/// 5.1.8 Bad sender's system address.
const BAD_SENDER_DOMAIN: EnhancedCode = EnhancedCode::new(5, 1, 8);
/// 5.7.27 Sender address has null MX (RFC 7505).
const SENDER_NULL_MX: EnhancedCode = EnhancedCode::new(5, 7, 27);

/// Require the envelope-sender domain to publish at least one usable MX.
///
/// The null sender (`MAIL FROM:<>`) always passes so bounces are accepted.
pub fn require_mx_record<R>(ctx: &CheckContext<'_, R>, mail_from: &str) -> CheckResult
where
    R: Resolver + ?Sized,
{
    let result = evaluate(ctx, mail_from);
    ctx.logger.verdict(&result);
    result
}

fn evaluate<R>(ctx: &CheckContext<'_, R>, mail_from: &str) -> CheckResult
where
    R: Resolver + ?Sized,
{
    if mail_from.is_empty() {
        ctx.logger.debug("null sender, MX lookup skipped");
        return CheckResult::Pass;
    }

    let domain = match mail_from.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => domain,
        _ => return fail(MALFORMED_SENDER, BAD_SENDER_SYNTAX),
    };

    if parse_address_literal(domain).is_literal() {
        return fail(LITERAL_DOMAIN, BAD_SENDER_DOMAIN);
    }

    let ascii = match idna::domain_to_ascii(strip_root_dot(domain)) {
        Ok(ascii) if is_valid_dns_name(&ascii) => ascii,
        _ => return fail(MALFORMED_SENDER, BAD_SENDER_SYNTAX),
    };

    let records = match ctx.resolver.lookup_mx(&ascii) {
        Ok(records) => records,
        Err(err) => {
            ctx.logger.dns_error("MX lookup failed", &err);
            let reason = if err.is_not_found() {
                NO_DOMAIN
            } else {
                LOOKUP_FAILED
            };
            return CheckFailure::from_dns(CheckKind::MxRecord, reason, BAD_SENDER_DOMAIN, err)
                .into();
        }
    };

    match records.as_slice() {
        [] => fail(NO_MX, BAD_SENDER_DOMAIN),
        [only] if only.is_null() => fail(NULL_MX, SENDER_NULL_MX),
        _ => CheckResult::Pass,
    }
}

fn fail(reason: &'static str, enhanced: EnhancedCode) -> CheckResult {
    CheckFailure::permanent(CheckKind::MxRecord, reason, enhanced).into()
}

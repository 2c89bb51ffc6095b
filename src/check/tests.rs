use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use super::{
    CheckContext, CheckKind, CheckLogger, CheckOptions, CheckResult, CheckSuite, FailAction,
    FailureKind, Verdict, require_matching_ehlo, require_matching_rdns, require_mx_record,
    suite::{CheckOutcome, fold_verdict},
};
use crate::future::RdnsFuture;
use crate::resolver::{DnsError, Zone, ZoneResolver};
use crate::session::ConnectionMetadata;

const PEER: IpAddr = IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4));

fn conn(ip: IpAddr, hostname: &str, rdns: Result<Option<String>, DnsError>) -> ConnectionMetadata {
    ConnectionMetadata::new(ip, hostname, Arc::new(RdnsFuture::resolved(rdns)))
}

fn v6(text: &str) -> Ipv6Addr {
    text.parse().expect("valid IPv6 address")
}

fn rdns_check(rdns: &str, hostname: &str) -> CheckResult {
    let ptr = (!rdns.is_empty()).then(|| rdns.to_string());
    let resolver = ZoneResolver::new();
    let conn = conn(PEER, hostname, Ok(ptr));
    let logger = CheckLogger::for_check(CheckKind::MatchingRdns);
    require_matching_rdns(&CheckContext::new(&resolver, &conn, &logger))
}

#[test]
fn rdns_table() {
    let cases = [
        ("", "example.org", true),
        ("example.org", "[1.2.3.4]", true),
        ("example.org", "[IPv6:beef::1]", true),
        ("example.org", "example.org", false),
        ("example.org.", "example.org", false),
        ("example.org", "example.org.", false),
        ("example.org.", "example.org.", false),
        ("example.com.", "example.org.", true),
        ("Example.ORG.", "example.org", false),
    ];
    for (rdns, hostname, fail) in cases {
        let result = rdns_check(rdns, hostname);
        assert_eq!(!result.is_pass(), fail, "rdns {rdns:?}, hostname {hostname:?}: {result:?}");
    }
}

#[test]
fn rdns_reasons() {
    assert_eq!(
        rdns_check("", "example.org").reason(),
        Some("no usable reverse DNS record")
    );
    assert_eq!(
        rdns_check("example.org", "[not valid]").reason(),
        Some("peer used an address literal, cannot match against reverse DNS")
    );
    assert_eq!(
        rdns_check("example.com.", "example.org").reason(),
        Some("reverse DNS name does not match announced hostname")
    );
}

#[test]
fn rdns_literal_wins_over_missing_ptr() {
    assert_eq!(
        rdns_check("", "[1.2.3.4]").reason(),
        Some("peer used an address literal, cannot match against reverse DNS")
    );
}

#[test]
fn rdns_root_only_ptr_is_no_name() {
    for hostname in ["", ".", "example.org"] {
        assert_eq!(
            rdns_check(".", hostname).reason(),
            Some("no usable reverse DNS record"),
            "hostname {hostname:?}"
        );
    }
}

#[test]
fn rdns_empty_announced_hostname_never_matches() {
    assert!(!rdns_check("example.org.", "").is_pass());
    assert!(!rdns_check("example.org.", ".").is_pass());
}

#[test]
fn rdns_and_ehlo_agree_on_padded_hostname() {
    assert!(rdns_check("example.org.", " example.org ").is_pass());
    let a = Some(vec![Ipv4Addr::new(1, 2, 3, 4)]);
    assert!(ehlo_check(" example.org ", PEER, a, Some(vec![])).is_pass());
}

#[test]
fn rdns_transient_error_is_temporary_failure() {
    let resolver = ZoneResolver::new();
    let conn = conn(PEER, "example.org", Err(DnsError::timeout("4.3.2.1.in-addr.arpa.")));
    let logger = CheckLogger::for_check(CheckKind::MatchingRdns);
    let result = require_matching_rdns(&CheckContext::new(&resolver, &conn, &logger));

    let failure = result.failure().expect("lookup error fails the check");
    assert_eq!(failure.reason, "no usable reverse DNS record");
    assert_eq!(failure.kind, FailureKind::Temporary);
    assert!(matches!(failure.error, Some(DnsError::Timeout { .. })));
    assert_eq!(failure.smtp_reply().code, 451);
}

fn mx_check(resolver: &ZoneResolver, mail_from: &str) -> CheckResult {
    let conn = conn(PEER, "", Ok(None));
    let logger = CheckLogger::for_check(CheckKind::MxRecord);
    require_mx_record(&CheckContext::new(resolver, &conn, &logger), mail_from)
}

fn mx_zone(domain: &str, exchanges: &[&str]) -> ZoneResolver {
    let zone = exchanges
        .iter()
        .fold(Zone::new(), |zone, exchange| zone.with_mx(10, exchange));
    ZoneResolver::new().with_zone(domain, zone)
}

#[test]
fn mx_table() {
    let cases: [(&str, &str, &[&str], bool); 9] = [
        ("foo@example.org", "example.org", &[], true),
        ("foo@example.com", "", &[], true),
        ("foo@[1.2.3.4]", "", &[], true),
        ("[IPv6:beef::1]", "", &[], true),
        ("foo@[IPv6:beef::1]", "", &[], true),
        ("foo@example.org", "example.org", &["a.com"], false),
        ("foo@", "", &[], true),
        ("", "", &[], false),
        ("foo@example.org", "example.org", &["."], true),
    ];
    for (mail_from, domain, exchanges, fail) in cases {
        let resolver = mx_zone(domain, exchanges);
        let result = mx_check(&resolver, mail_from);
        assert_eq!(!result.is_pass(), fail, "{mail_from:?}, {exchanges:?}: {result:?}");
    }
}

#[test]
fn mx_reasons() {
    let resolver = mx_zone("example.org", &[]);
    assert_eq!(
        mx_check(&resolver, "foo@example.org").reason(),
        Some("no MX records for sender domain")
    );
    assert_eq!(
        mx_check(&resolver, "foo@example.com").reason(),
        Some("sender domain does not exist")
    );
    assert_eq!(
        mx_check(&resolver, "foo").reason(),
        Some("malformed envelope sender")
    );
    assert_eq!(
        mx_check(&resolver, "foo@").reason(),
        Some("malformed envelope sender")
    );
    assert_eq!(
        mx_check(&resolver, "foo@[1.2.3.4]").reason(),
        Some("envelope sender domain is an address literal")
    );
    assert_eq!(
        mx_check(&mx_zone("example.org", &["."]), "foo@example.org").reason(),
        Some("sender domain explicitly declines mail (null MX)")
    );
}

#[test]
fn mx_splits_on_last_at_sign() {
    let resolver = mx_zone("example.org", &["mx.example.org"]);
    assert!(mx_check(&resolver, "\"foo@bar\"@example.org").is_pass());
}

#[test]
fn mx_domain_is_case_and_root_dot_insensitive() {
    let resolver = mx_zone("example.org", &["mx.example.org"]);
    assert!(mx_check(&resolver, "foo@Example.ORG.").is_pass());
}

#[test]
fn mx_null_record_among_others_passes() {
    let resolver = mx_zone("example.org", &[".", "mx.example.org"]);
    assert!(mx_check(&resolver, "foo@example.org").is_pass());
}

#[test]
fn mx_null_sender_skips_dns() {
    let resolver = ZoneResolver::new().with_zone(
        "example.org",
        Zone::new().failing(DnsError::server_failure("example.org.")),
    );
    assert!(mx_check(&resolver, "").is_pass());
}

#[test]
fn mx_resolver_fault_is_temporary() {
    let resolver = ZoneResolver::new().with_zone(
        "example.org",
        Zone::new().failing(DnsError::server_failure("example.org.")),
    );
    let result = mx_check(&resolver, "foo@example.org");
    let failure = result.failure().expect("fault fails the check");
    assert_eq!(failure.reason, "MX lookup for sender domain failed");
    assert!(failure.is_temporary());
}

#[test]
fn mx_oversized_label_is_permanent_syntax_error() {
    let domain = format!("{}.example.org", "a".repeat(64));
    // any query would come back as a transient fault
    let resolver = ZoneResolver::new().with_zone(
        &domain,
        Zone::new().failing(DnsError::server_failure(domain.as_str())),
    );
    let result = mx_check(&resolver, &format!("foo@{domain}"));
    let failure = result.failure().expect("invalid domain fails the check");
    assert_eq!(failure.reason, "malformed envelope sender");
    assert_eq!(failure.kind, FailureKind::Permanent);
    assert_eq!(failure.smtp_reply().code, 550);
}

#[test]
fn mx_nxdomain_is_permanent() {
    let result = mx_check(&ZoneResolver::new(), "foo@example.com");
    let failure = result.failure().expect("nxdomain fails the check");
    assert_eq!(failure.kind, FailureKind::Permanent);
    assert!(failure.error.as_ref().is_some_and(DnsError::is_not_found));
}

fn ehlo_check(
    hostname: &str,
    ip: IpAddr,
    a: Option<Vec<Ipv4Addr>>,
    aaaa: Option<Vec<Ipv6Addr>>,
) -> CheckResult {
    let mut resolver = ZoneResolver::new();
    // a zone exists only when both families are given
    if let (Some(a), Some(aaaa)) = (a, aaaa) {
        resolver.insert_zone(hostname, Zone::new().with_a(a).with_aaaa(aaaa));
    }
    let conn = conn(ip, hostname, Ok(None));
    let logger = CheckLogger::for_check(CheckKind::MatchingEhlo);
    require_matching_ehlo(&CheckContext::new(&resolver, &conn, &logger))
}

#[test]
fn ehlo_table() {
    let other = Ipv4Addr::new(2, 3, 4, 5);
    let own = Ipv4Addr::new(1, 2, 3, 4);
    let beef1 = v6("beef::1");

    let cases: Vec<(&str, IpAddr, Option<Vec<Ipv4Addr>>, Option<Vec<Ipv6Addr>>, bool)> = vec![
        ("mx.example.org", PEER, None, None, true),
        ("mx.example.org", PEER, Some(vec![]), Some(vec![]), true),
        ("mx.example.org", PEER, Some(vec![other]), None, true),
        ("mx.example.org", PEER, Some(vec![other]), Some(vec![beef1]), true),
        ("mx.example.org", PEER, Some(vec![own]), None, true),
        ("mx.example.org", PEER, Some(vec![own]), Some(vec![beef1]), false),
        ("[1.2.3.5]", PEER, None, None, true),
        ("[not valid]", PEER, None, None, true),
        ("[1.2.3.4]", PEER, None, None, false),
        ("[IPv6:beef::1]", PEER, None, None, true),
        ("[IPv6:NOT VALID]", PEER, None, None, true),
        ("[IPv6:beef::1]", IpAddr::V6(v6("beef::2")), None, None, true),
        ("[IPv6:beef::1]", IpAddr::V6(beef1), None, None, false),
    ];

    for (hostname, ip, a, aaaa, fail) in cases {
        let result = ehlo_check(hostname, ip, a.clone(), aaaa.clone());
        assert_eq!(
            !result.is_pass(),
            fail,
            "hostname {hostname}, ip {ip}, a {a:?}, aaaa {aaaa:?}: {result:?}"
        );
    }
}

#[test]
fn ehlo_reasons() {
    let own = Ipv4Addr::new(1, 2, 3, 4);
    assert_eq!(
        ehlo_check("[not valid]", PEER, None, None).reason(),
        Some("invalid address literal in greeting")
    );
    assert_eq!(
        ehlo_check("[1.2.3.5]", PEER, None, None).reason(),
        Some("address literal does not match connection address")
    );
    assert_eq!(
        ehlo_check("mx.example.org", PEER, None, None).reason(),
        Some("greeting hostname does not resolve")
    );
    assert_eq!(
        ehlo_check("mx.example.org", PEER, Some(vec![]), Some(vec![])).reason(),
        Some("greeting hostname does not resolve to connection address")
    );
    let a = Some(vec![own]);
    assert!(ehlo_check("mx.example.org", PEER, a, Some(vec![v6("beef::1")])).is_pass());
}

#[test]
fn ehlo_ipv6_peer_checks_aaaa_set() {
    let peer = IpAddr::V6(v6("beef::1"));
    let published = Some(vec![v6("beef::1")]);
    assert!(ehlo_check("mx.example.org", peer, Some(vec![]), published).is_pass());

    let published = Some(vec![v6("beef::2")]);
    assert!(!ehlo_check("mx.example.org", peer, Some(vec![]), published).is_pass());
}

#[test]
fn ehlo_mapped_peer_matches_ipv4_literal() {
    let mapped = IpAddr::V6(Ipv4Addr::new(1, 2, 3, 4).to_ipv6_mapped());
    assert!(ehlo_check("[1.2.3.4]", mapped, None, None).is_pass());
}

#[test]
fn ehlo_empty_hostname_fails_without_query() {
    assert_eq!(
        ehlo_check("", PEER, None, None).reason(),
        Some("greeting hostname does not resolve")
    );
}

#[test]
fn ehlo_oversized_label_is_permanent() {
    let hostname = format!("{}.example.org", "a".repeat(64));
    let resolver = ZoneResolver::new().with_zone(
        &hostname,
        Zone::new().failing(DnsError::timeout(hostname.as_str())),
    );
    let conn = conn(PEER, &hostname, Ok(None));
    let logger = CheckLogger::for_check(CheckKind::MatchingEhlo);
    let result = require_matching_ehlo(&CheckContext::new(&resolver, &conn, &logger));

    let failure = result.failure().expect("invalid hostname fails the check");
    assert_eq!(failure.reason, "greeting hostname does not resolve");
    assert_eq!(failure.kind, FailureKind::Permanent);
    assert!(failure.error.is_none());
    insta::assert_snapshot!(
        failure.smtp_reply().to_string(),
        @"550 5.7.1 greeting hostname does not resolve"
    );
}

#[test]
fn ehlo_fault_on_either_family_fails() {
    let resolver = ZoneResolver::new().with_zone(
        "mx.example.org",
        Zone::new()
            .with_a([Ipv4Addr::new(1, 2, 3, 4)])
            .failing(DnsError::timeout("mx.example.org.")),
    );
    let conn = conn(PEER, "mx.example.org", Ok(None));
    let logger = CheckLogger::for_check(CheckKind::MatchingEhlo);
    let result = require_matching_ehlo(&CheckContext::new(&resolver, &conn, &logger));
    let failure = result.failure().expect("fault fails the check");
    assert_eq!(failure.reason, "greeting hostname does not resolve");
    assert!(failure.is_temporary());
}

#[test]
fn smtp_reply_rendering() {
    let failure = rdns_check("example.com.", "example.org")
        .failure()
        .cloned()
        .expect("mismatch");
    insta::assert_snapshot!(
        failure.smtp_reply().to_string(),
        @"550 5.7.25 reverse DNS name does not match announced hostname"
    );

    let resolver = mx_zone("example.org", &["."]);
    let failure = mx_check(&resolver, "foo@example.org")
        .failure()
        .cloned()
        .expect("null mx");
    insta::assert_snapshot!(
        failure.smtp_reply().to_string(),
        @"550 5.7.27 sender domain explicitly declines mail (null MX)"
    );
}

#[test]
fn suite_runs_all_checks_and_accepts_consistent_sender() {
    let resolver = ZoneResolver::new()
        .with_zone(
            "mx.example.org",
            Zone::new()
                .with_a([Ipv4Addr::new(1, 2, 3, 4)])
                .with_aaaa([v6("beef::1")]),
        )
        .with_zone("example.org", Zone::new().with_mx(10, "mx.example.org"));
    let conn = conn(PEER, "mx.example.org", Ok(Some("mx.example.org.".to_string())));

    let report = CheckSuite::default().run(&resolver, &conn, "foo@example.org");
    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes.iter().all(|outcome| outcome.result.is_pass()));
    assert_eq!(report.verdict, Verdict::Accept);
}

#[test]
fn suite_applies_fail_actions() {
    let resolver = ZoneResolver::new();
    let conn = conn(PEER, "[1.2.3.4]", Ok(None));
    let options = CheckOptions::new()
        .with_action(CheckKind::MatchingRdns, FailAction::Quarantine)
        .with_action(CheckKind::MxRecord, FailAction::Ignore);

    let report = CheckSuite::new(options).run(&resolver, &conn, "foo@example.org");
    assert!(report.outcomes[2].result.is_pass());
    assert_eq!(
        report.verdict,
        Verdict::Quarantine {
            checks: vec![CheckKind::MatchingRdns]
        }
    );
}

#[test]
fn permanent_rejection_wins_over_temporary() {
    let temporary = CheckOutcome {
        check: CheckKind::MatchingRdns,
        action: FailAction::Reject,
        result: rdns_failure_with(Err(DnsError::timeout("4.3.2.1.in-addr.arpa."))),
    };
    let permanent = CheckOutcome {
        check: CheckKind::MxRecord,
        action: FailAction::Reject,
        result: mx_check(&ZoneResolver::new(), "foo@example.com"),
    };

    match fold_verdict(&[temporary.clone(), permanent]) {
        Verdict::Reject { reply } => {
            assert_eq!(reply.code, 550);
            assert_eq!(reply.message, "sender domain does not exist");
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    match fold_verdict(&[temporary]) {
        Verdict::Reject { reply } => assert!(reply.is_temporary()),
        other => panic!("expected temporary rejection, got {other:?}"),
    }
}

fn rdns_failure_with(rdns: Result<Option<String>, DnsError>) -> CheckResult {
    let resolver = ZoneResolver::new();
    let conn = conn(PEER, "example.org", rdns);
    let logger = CheckLogger::for_check(CheckKind::MatchingRdns);
    require_matching_rdns(&CheckContext::new(&resolver, &conn, &logger))
}

#[test]
fn fail_action_parses_case_insensitively() {
    assert_eq!("Reject".parse::<FailAction>(), Ok(FailAction::Reject));
    assert_eq!("quarantine".parse::<FailAction>(), Ok(FailAction::Quarantine));
    assert!("drop".parse::<FailAction>().is_err());
}

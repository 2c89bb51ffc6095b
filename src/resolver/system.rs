use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use trust_dns_resolver::{
    Resolver as TrustResolver,
    error::{ResolveError, ResolveErrorKind},
    proto::op::ResponseCode,
    system_conf::read_system_conf,
};

use super::{DnsError, MxRecord, Resolver, ResolverOptions, types::normalize_exchange};
use crate::hostname::{absolute_name, is_valid_dns_name};

/// Live resolver using the system configuration (`/etc/resolv.conf`).
pub struct SystemResolver {
    inner: TrustResolver,
}

impl SystemResolver {
    pub fn from_system_conf() -> Result<Self, DnsError> {
        Self::with_options(&ResolverOptions::default())
    }

    pub fn with_options(options: &ResolverOptions) -> Result<Self, DnsError> {
        let (config, mut opts) = read_system_conf().map_err(DnsError::resolver_init)?;
        opts.timeout = options.timeout();
        opts.attempts = options.attempts();
        let inner = TrustResolver::new(config, opts).map_err(DnsError::resolver_init)?;
        Ok(Self { inner })
    }
}

impl std::fmt::Debug for SystemResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemResolver").finish_non_exhaustive()
    }
}

impl Resolver for SystemResolver {
    fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DnsError> {
        let name = ip.to_string();
        let Some(lookup) = classify(&name, self.inner.reverse_lookup(ip))? else {
            return Ok(Vec::new());
        };
        Ok(lookup.iter().map(|ptr| ptr.to_string()).collect())
    }

    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        let name = query_name(domain)?;
        let Some(lookup) = classify(&name, self.inner.mx_lookup(name.as_str()))? else {
            return Ok(Vec::new());
        };
        let mut records: Vec<MxRecord> = lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
            .collect();
        records.sort();
        records.dedup();
        Ok(records)
    }

    fn lookup_ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        let name = query_name(name)?;
        let Some(lookup) = classify(&name, self.inner.ipv4_lookup(name.as_str()))? else {
            return Ok(Vec::new());
        };
        Ok(lookup.iter().map(|a| Ipv4Addr::from(*a)).collect())
    }

    fn lookup_ipv6(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        let name = query_name(name)?;
        let Some(lookup) = classify(&name, self.inner.ipv6_lookup(name.as_str()))? else {
            return Ok(Vec::new());
        };
        Ok(lookup.iter().map(|aaaa| Ipv6Addr::from(*aaaa)).collect())
    }
}

/// Absolute query name, or [`DnsError::InvalidName`] before anything is sent.
fn query_name(name: &str) -> Result<String, DnsError> {
    if !is_valid_dns_name(name) {
        return Err(DnsError::invalid_name(name.trim()));
    }
    Ok(absolute_name(name))
}

/// `Ok(None)` for NODATA, `Err` for NXDOMAIN and resolver faults.
fn classify<T>(name: &str, result: Result<T, ResolveError>) -> Result<Option<T>, DnsError> {
    let err = match result {
        Ok(lookup) => return Ok(Some(lookup)),
        Err(err) => err,
    };
    if let ResolveErrorKind::NoRecordsFound { response_code, .. } = err.kind() {
        return match *response_code {
            ResponseCode::NXDomain => Err(DnsError::nx_domain(name)),
            ResponseCode::NoError => Ok(None),
            _ => Err(DnsError::server_failure(name)),
        };
    }
    if matches!(err.kind(), ResolveErrorKind::Timeout) {
        return Err(DnsError::timeout(name));
    }
    Err(DnsError::lookup(name, err))
}

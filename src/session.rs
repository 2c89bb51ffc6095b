//! Per-connection data handed to the checks.

use std::net::IpAddr;
use std::sync::Arc;
use std::thread;

use crate::future::RdnsFuture;
use crate::hostname::strip_root_dot;
use crate::resolver::{DnsError, Resolver};

#[derive(Debug, Clone)]
pub struct ConnectionMetadata {
    remote_ip: IpAddr,
    hostname: String,
    rdns: Arc<RdnsFuture>,
}

impl ConnectionMetadata {
    /// Surrounding whitespace in `hostname` is dropped.
    pub fn new(remote_ip: IpAddr, hostname: impl Into<String>, rdns: Arc<RdnsFuture>) -> Self {
        Self {
            remote_ip,
            hostname: hostname.into().trim().to_string(),
            rdns,
        }
    }

    pub fn remote_ip(&self) -> IpAddr {
        self.remote_ip
    }

    /// Name announced in EHLO/HELO; a domain or an address literal.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn rdns(&self) -> &RdnsFuture {
        &self.rdns
    }
}

/// First PTR name of `ip`. NXDOMAIN, empty answers and root-only names map
/// to `Ok(None)`.
pub fn lookup_rdns_name<R>(resolver: &R, ip: IpAddr) -> Result<Option<String>, DnsError>
where
    R: Resolver + ?Sized,
{
    match resolver.lookup_addr(ip) {
        Ok(names) => Ok(names
            .into_iter()
            .find(|name| !strip_root_dot(name).is_empty())),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Start the reverse lookup for `ip` and return the future it resolves.
///
/// The future is set exactly once on every path. If no thread can be spawned
/// the lookup runs on the caller's thread.
pub fn spawn_rdns_lookup<R>(resolver: Arc<R>, ip: IpAddr) -> Arc<RdnsFuture>
where
    R: Resolver + ?Sized + 'static,
{
    let future = Arc::new(RdnsFuture::new());
    let producer = Arc::clone(&future);
    let worker_resolver = Arc::clone(&resolver);

    let spawned = thread::Builder::new()
        .name("rdns-lookup".to_string())
        .spawn(move || {
            producer.set(lookup_rdns_name(&*worker_resolver, ip));
        });

    if let Err(err) = spawned {
        tracing::warn!(%ip, error = %err, "cannot spawn rDNS worker, resolving inline");
        future.set(lookup_rdns_name(&*resolver, ip));
    }
    future
}

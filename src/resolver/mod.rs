//! DNS capability consumed by the checks.
//!
//! [`SystemResolver`] queries the resolvers listed in the system configuration,
//! with every query bounded by [`ResolverOptions::timeout`]. [`ZoneResolver`]
//! answers from an in-memory zone map and is used in tests and dry runs.

mod error;
mod options;
mod system;
mod types;
mod zone;

pub use error::DnsError;
pub use options::ResolverOptions;
pub use system::SystemResolver;
pub use types::MxRecord;
pub use zone::{Zone, ZoneResolver};

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Queries needed by the sender checks.
///
/// A name that exists but has no record of the requested type yields
/// `Ok(vec![])`; a name that does not exist yields [`DnsError::NxDomain`].
/// Implementations carry no per-connection state and are shared between
/// concurrently running checks.
pub trait Resolver: Send + Sync {
    /// PTR names for `ip`.
    fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DnsError>;

    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError>;

    fn lookup_ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError>;

    fn lookup_ipv6(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError>;
}

impl<R: Resolver + ?Sized> Resolver for std::sync::Arc<R> {
    fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DnsError> {
        (**self).lookup_addr(ip)
    }

    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        (**self).lookup_mx(domain)
    }

    fn lookup_ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        (**self).lookup_ipv4(name)
    }

    fn lookup_ipv6(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        (**self).lookup_ipv6(name)
    }
}

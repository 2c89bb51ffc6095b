use std::sync::Arc;

use thiserror::Error;

/// Failures reported by a [`Resolver`](super::Resolver).
///
/// [`DnsError::NxDomain`] is a definitive negative answer and
/// [`DnsError::InvalidName`] a name that cannot be queried at all. Every other
/// variant is a resolver fault that may succeed on retry.
#[derive(Debug, Clone, Error)]
pub enum DnsError {
    #[error("{name} does not exist (NXDOMAIN)")]
    NxDomain { name: String },
    #[error("{name} is not a valid DNS name")]
    InvalidName { name: String },
    #[error("server failure while resolving {name}")]
    ServerFailure { name: String },
    #[error("DNS query for {name} timed out")]
    Timeout { name: String },
    #[error("DNS lookup failed for {name}: {source}")]
    Lookup {
        name: String,
        #[source]
        source: Arc<trust_dns_resolver::error::ResolveError>,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl DnsError {
    pub fn nx_domain(name: impl Into<String>) -> Self {
        Self::NxDomain { name: name.into() }
    }

    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn server_failure(name: impl Into<String>) -> Self {
        Self::ServerFailure { name: name.into() }
    }

    pub fn timeout(name: impl Into<String>) -> Self {
        Self::Timeout { name: name.into() }
    }

    pub(crate) fn lookup(
        name: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        Self::Lookup {
            name: name.into(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit {
            source: Arc::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NxDomain { .. })
    }

    /// Malformed names and NXDOMAIN are definitive; everything else may
    /// succeed on retry.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::NxDomain { .. } | Self::InvalidName { .. })
    }
}

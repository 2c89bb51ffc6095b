use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{DnsError, MxRecord, Resolver, types::normalize_exchange};
use crate::hostname::strip_root_dot;

/// Records published under one name.
#[derive(Debug, Clone, Default)]
pub struct Zone {
    pub a: Vec<Ipv4Addr>,
    pub aaaa: Vec<Ipv6Addr>,
    pub mx: Vec<MxRecord>,
    /// Returned for every query against this name instead of the records.
    pub failure: Option<DnsError>,
}

impl Zone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_a<I>(mut self, addrs: I) -> Self
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        self.a.extend(addrs);
        self
    }

    pub fn with_aaaa<I>(mut self, addrs: I) -> Self
    where
        I: IntoIterator<Item = Ipv6Addr>,
    {
        self.aaaa.extend(addrs);
        self
    }

    pub fn with_mx(mut self, preference: u16, exchange: &str) -> Self {
        self.mx.push(MxRecord::new(preference, normalize_exchange(exchange)));
        self
    }

    pub fn failing(mut self, error: DnsError) -> Self {
        self.failure = Some(error);
        self
    }
}

/// In-memory resolver. Names absent from the map answer NXDOMAIN.
#[derive(Debug, Clone, Default)]
pub struct ZoneResolver {
    zones: HashMap<String, Zone>,
    ptr: HashMap<IpAddr, Vec<String>>,
}

impl ZoneResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(mut self, name: &str, zone: Zone) -> Self {
        self.insert_zone(name, zone);
        self
    }

    pub fn with_ptr<I, S>(mut self, ip: IpAddr, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_ptr(ip, names);
        self
    }

    pub fn insert_zone(&mut self, name: &str, zone: Zone) {
        self.zones.insert(zone_key(name), zone);
    }

    pub fn insert_ptr<I, S>(&mut self, ip: IpAddr, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ptr.insert(ip, names.into_iter().map(Into::into).collect());
    }

    fn zone(&self, name: &str) -> Result<&Zone, DnsError> {
        let zone = self
            .zones
            .get(&zone_key(name))
            .ok_or_else(|| DnsError::nx_domain(name))?;
        match &zone.failure {
            Some(err) => Err(err.clone()),
            None => Ok(zone),
        }
    }
}

impl Resolver for ZoneResolver {
    fn lookup_addr(&self, ip: IpAddr) -> Result<Vec<String>, DnsError> {
        self.ptr
            .get(&ip)
            .cloned()
            .ok_or_else(|| DnsError::nx_domain(ip.to_string()))
    }

    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, DnsError> {
        Ok(self.zone(domain)?.mx.clone())
    }

    fn lookup_ipv4(&self, name: &str) -> Result<Vec<Ipv4Addr>, DnsError> {
        Ok(self.zone(name)?.a.clone())
    }

    fn lookup_ipv6(&self, name: &str) -> Result<Vec<Ipv6Addr>, DnsError> {
        Ok(self.zone(name)?.aaaa.clone())
    }
}

fn zone_key(name: &str) -> String {
    strip_root_dot(name.trim()).to_ascii_lowercase()
}

//! The record filled in by the collector and consumed by the presenter.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Outcome of a single best-effort lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The lookup failed; the reason is for logs, not for the table.
    Unavailable(String),
}

impl<T> Lookup<T> {
    pub fn unavailable(reason: impl fmt::Display) -> Self {
        Self::Unavailable(reason.to_string())
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Unavailable(_) => None,
        }
    }

    #[cfg(test)]
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::Unavailable(reason) => Lookup::Unavailable(reason),
        }
    }
}

impl<T, E: fmt::Display> From<std::result::Result<T, E>> for Lookup<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Lookup::Found(value),
            Err(e) => Lookup::unavailable(e),
        }
    }
}

/// The local-facing address and, when it could be matched, its interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalAddress {
    pub ip: IpAddr,
    pub interface: Option<String>,
}

/// Extra per-interface facts shown with `--details`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDetails {
    pub interface: Lookup<String>,
    pub subnet_mask: Lookup<Ipv4Addr>,
    pub broadcast: Lookup<Ipv4Addr>,
    pub mac: Lookup<String>,
    pub ipv6: Lookup<Ipv6Addr>,
    pub ipv6_gateway: Lookup<Ipv6Addr>,
    pub signal: Lookup<SignalStrength>,
}

/// Wireless signal level in dBm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalStrength {
    pub dbm: i32,
}

impl SignalStrength {
    /// Rough quality percentage: -100 dBm is 0%, -50 dBm and above is 100%.
    pub fn percent(&self) -> u8 {
        (2 * (self.dbm + 100)).clamp(0, 100) as u8
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dBm ({}%)", self.dbm, self.percent())
    }
}

/// Round-trip times collected with `--ping`. `None` means not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PingResults {
    pub local: Option<Lookup<String>>,
    pub external: Option<Lookup<String>>,
    pub gateway: Option<Lookup<String>>,
    pub ipv6: Option<Lookup<String>>,
}

/// Everything gathered during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSnapshot {
    pub hostname: Option<String>,
    pub local_ip: Lookup<LocalAddress>,
    pub external_ip: Lookup<IpAddr>,
    pub gateway_ip: Lookup<IpAddr>,
    pub dns_servers: Lookup<Vec<IpAddr>>,
    pub details: Option<InterfaceDetails>,
    pub pings: PingResults,
    pub latency: Option<Lookup<String>>,
}

impl NetworkSnapshot {
    /// A snapshot where every core lookup failed.
    #[cfg(test)]
    pub fn unavailable(reason: &str) -> Self {
        Self {
            hostname: None,
            local_ip: Lookup::unavailable(reason),
            external_ip: Lookup::unavailable(reason),
            gateway_ip: Lookup::unavailable(reason),
            dns_servers: Lookup::unavailable(reason),
            details: None,
            pings: PingResults::default(),
            latency: None,
        }
    }
}

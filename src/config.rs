//! Run settings: built-in defaults overridden by command-line flags.
//!
//! Nothing is read from files or the environment, so the same flags always
//! produce the same lookups.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use crate::cli::Args;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint whose response body is the caller's public address.
    pub echo_url: String,

    /// Address the UDP socket "connects" to when inferring the local IPv4.
    pub route_v4: String,

    /// Same as `route_v4`, used when there is no IPv4 route.
    pub route_v6: String,

    /// Local addresses the route sockets bind to.
    pub bind_v4: SocketAddr,
    pub bind_v6: SocketAddr,

    pub http_timeout_secs: u64,

    /// Wait time handed to `ping -W`.
    pub ping_timeout_secs: u64,

    /// Host pinged by `--latency`.
    pub latency_target: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            echo_url: "https://api.ipify.org".to_string(),
            route_v4: "8.8.8.8:80".to_string(),
            route_v6: "[2001:4860:4860::8888]:80".to_string(),
            bind_v4: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            bind_v6: SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
            http_timeout_secs: 5,
            ping_timeout_secs: 1,
            latency_target: "google.com".to_string(),
        }
    }
}

impl Config {
    /// Defaults with every flag given on the command line applied.
    pub fn from_args(args: &Args) -> Self {
        let mut config = Self::default();
        if let Some(url) = &args.echo_url {
            config.echo_url = url.clone();
        }
        if let Some(target) = &args.route_v4 {
            config.route_v4 = target.clone();
        }
        if let Some(target) = &args.route_v6 {
            config.route_v6 = target.clone();
        }
        if let Some(secs) = args.http_timeout {
            config.http_timeout_secs = secs;
        }
        if let Some(secs) = args.timeout {
            config.ping_timeout_secs = secs;
        }
        if let Some(target) = &args.latency_target {
            config.latency_target = target.clone();
        }
        config
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}

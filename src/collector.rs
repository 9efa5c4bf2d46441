//! Info collector: runs each lookup in turn and fills a [`NetworkSnapshot`].
//!
//! Lookups are independent. A failure only marks its own field as
//! unavailable; the single fatal case is a host without any usable socket.

use std::fmt;
use std::net::IpAddr;

use crate::config::Config;
use crate::error::Result;
use crate::snapshot::{InterfaceDetails, LocalAddress, Lookup, NetworkSnapshot, PingResults};
use crate::system::{self, EchoClient, InterfaceInfo};

/// Optional parts of the report requested on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sections {
    pub details: bool,
    pub ping: bool,
    pub latency: bool,
}

pub struct Collector {
    config: Config,
    echo: EchoClient,
}

impl Collector {
    pub fn new(config: Config) -> Self {
        let echo = EchoClient::new(config.http_timeout());
        Self { config, echo }
    }

    /// Gather a snapshot. Only fails when no UDP socket can be opened.
    pub async fn collect(&self, sections: Sections) -> Result<NetworkSnapshot> {
        let hostname = match system::hostname() {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!(error = %e, "host name unavailable");
                None
            }
        };

        let interfaces = system::list_interfaces();
        tracing::debug!(count = interfaces.len(), "enumerated interfaces");

        let local_ip = self.local_ip(&interfaces).await?;
        let external_ip = self.external_ip().await;
        let gateway_ip = self.gateway_ip().await;
        let dns_servers = self.dns_servers().await;

        let details = if sections.details {
            Some(self.details(&interfaces, &local_ip).await)
        } else {
            None
        };

        let pings = if sections.ping {
            self.pings(&local_ip, &external_ip, &gateway_ip, details.as_ref())
                .await
        } else {
            PingResults::default()
        };

        let latency = if sections.latency {
            let target = &self.config.latency_target;
            let lookup: Lookup<String> =
                system::measure_latency(target, self.config.ping_timeout_secs)
                    .await
                    .into();
            Some(logged("latency", lookup))
        } else {
            None
        };

        Ok(NetworkSnapshot {
            hostname,
            local_ip,
            external_ip,
            gateway_ip,
            dns_servers,
            details,
            pings,
            latency,
        })
    }

    async fn local_ip(&self, interfaces: &[InterfaceInfo]) -> Result<Lookup<LocalAddress>> {
        let config = &self.config;
        let route = system::discover_local_ip(
            config.bind_v4,
            config.bind_v6,
            &config.route_v4,
            &config.route_v6,
        )
        .await?;
        let lookup = route.map(|ip| LocalAddress {
            ip,
            interface: system::interface_for(interfaces, ip).map(|iface| iface.name.clone()),
        });
        Ok(logged("local IP", lookup))
    }

    async fn external_ip(&self) -> Lookup<IpAddr> {
        tracing::info!(url = %self.config.echo_url, "querying echo service");
        logged(
            "external IP",
            self.echo.fetch(&self.config.echo_url).await.into(),
        )
    }

    async fn gateway_ip(&self) -> Lookup<IpAddr> {
        let lookup: Lookup<IpAddr> = system::default_gateway().await.map(IpAddr::V4).into();
        logged("gateway IP", lookup)
    }

    async fn dns_servers(&self) -> Lookup<Vec<IpAddr>> {
        logged("DNS servers", system::system_dns().await.into())
    }

    async fn details(
        &self,
        interfaces: &[InterfaceInfo],
        local_ip: &Lookup<LocalAddress>,
    ) -> InterfaceDetails {
        let selected = local_ip
            .found()
            .and_then(|local| system::interface_for(interfaces, local.ip))
            .filter(|iface| !iface.is_loopback)
            .or_else(|| system::primary_interface(interfaces));

        let Some(iface) = selected else {
            let none = "no active interface";
            return InterfaceDetails {
                interface: Lookup::unavailable(none),
                subnet_mask: Lookup::unavailable(none),
                broadcast: Lookup::unavailable(none),
                mac: Lookup::unavailable(none),
                ipv6: Lookup::unavailable(none),
                ipv6_gateway: logged("IPv6 gateway", system::default_gateway_v6().await.into()),
                signal: Lookup::unavailable(none),
            };
        };

        tracing::debug!(interface = %iface.name, "collecting interface details");

        InterfaceDetails {
            interface: Lookup::Found(iface.name.clone()),
            subnet_mask: found_or(iface.netmask, "no IPv4 netmask"),
            broadcast: found_or(iface.broadcast(), "no broadcast address"),
            mac: found_or(iface.mac.clone(), "no hardware address"),
            ipv6: found_or(iface.ipv6_address(), "no IPv6 address"),
            ipv6_gateway: logged("IPv6 gateway", system::default_gateway_v6().await.into()),
            signal: logged("signal", system::signal_strength(&iface.name).await.into()),
        }
    }

    async fn pings(
        &self,
        local_ip: &Lookup<LocalAddress>,
        external_ip: &Lookup<IpAddr>,
        gateway_ip: &Lookup<IpAddr>,
        details: Option<&InterfaceDetails>,
    ) -> PingResults {
        PingResults {
            local: self.ping(local_ip.found().map(|local| local.ip)).await,
            external: self.ping(external_ip.found().copied()).await,
            gateway: self.ping(gateway_ip.found().copied()).await,
            ipv6: self.ping(ipv6_ping_target(details)).await,
        }
    }

    /// Ping only addresses that were found.
    async fn ping(&self, addr: Option<IpAddr>) -> Option<Lookup<String>> {
        let addr = addr?;
        let lookup: Lookup<String> =
            system::ping(addr, self.config.ping_timeout_secs).await.into();
        Some(logged("ping", lookup))
    }
}

/// Link-local addresses need a zone to be reachable, so they are not pinged.
fn ipv6_ping_target(details: Option<&InterfaceDetails>) -> Option<IpAddr> {
    details
        .and_then(|d| d.ipv6.found())
        .filter(|v6| !system::is_link_local(v6))
        .map(|v6| IpAddr::V6(*v6))
}

fn found_or<T>(value: Option<T>, reason: &str) -> Lookup<T> {
    match value {
        Some(value) => Lookup::Found(value),
        None => Lookup::unavailable(reason),
    }
}

fn logged<T: fmt::Debug>(what: &str, lookup: Lookup<T>) -> Lookup<T> {
    match &lookup {
        Lookup::Found(value) => tracing::info!(lookup = what, ?value, "lookup succeeded"),
        Lookup::Unavailable(reason) => tracing::warn!(lookup = what, %reason, "lookup unavailable"),
    }
    lookup
}

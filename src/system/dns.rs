//! DNS resolver discovery via resolv.conf and, on macOS, `scutil --dns`.

use std::net::{IpAddr, Ipv6Addr};
use std::path::Path;

use crate::error::{IpiError, Result};

pub const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Get the DNS servers the system resolver uses.
///
/// On macOS `/etc/resolv.conf` is informational only, so the primary
/// resolver from `scutil --dns` wins when it lists anything.
pub async fn system_dns() -> Result<Vec<IpAddr>> {
    #[cfg(target_os = "macos")]
    {
        match scutil_dns().await {
            Ok(servers) if !servers.is_empty() => return Ok(servers),
            Ok(_) => tracing::debug!("scutil --dns listed no nameservers"),
            Err(e) => tracing::debug!(error = %e, "scutil --dns failed"),
        }
    }

    resolv_conf_dns(Path::new(RESOLV_CONF)).await
}

/// Read nameservers from a resolv.conf file.
pub async fn resolv_conf_dns(path: &Path) -> Result<Vec<IpAddr>> {
    let contents = tokio::fs::read(path).await?;
    let servers = parse_resolv_conf(&contents);

    if servers.is_empty() {
        return Err(IpiError::NotFound(format!(
            "no nameservers in {}",
            path.display()
        )));
    }

    Ok(servers)
}

/// Keep only the IPv6 resolvers.
pub fn ipv6_servers(servers: &[IpAddr]) -> Vec<Ipv6Addr> {
    servers
        .iter()
        .filter_map(|ip| match ip {
            IpAddr::V6(v6) => Some(*v6),
            IpAddr::V4(_) => None,
        })
        .collect()
}

fn parse_resolv_conf(contents: &[u8]) -> Vec<IpAddr> {
    match resolv_conf::Config::parse(contents) {
        Ok(conf) => conf
            .nameservers
            .into_iter()
            .map(|ns| match ns {
                resolv_conf::ScopedIp::V4(v4) => IpAddr::V4(v4),
                resolv_conf::ScopedIp::V6(v6, _) => IpAddr::V6(v6),
            })
            .collect(),
        Err(e) => {
            // A single odd option makes the strict parser give up; the
            // nameserver lines are still usable.
            tracing::debug!(error = %e, "resolv.conf rejected, scanning nameserver lines");
            scan_nameserver_lines(&String::from_utf8_lossy(contents))
        }
    }
}

fn scan_nameserver_lines(contents: &str) -> Vec<IpAddr> {
    contents
        .lines()
        .filter_map(|line| {
            let mut words = line.split_whitespace();
            if words.next()? != "nameserver" {
                return None;
            }
            parse_scoped(words.next()?)
        })
        .collect()
}

/// Parse an address that may carry a zone suffix (`fe80::1%en0`).
fn parse_scoped(addr: &str) -> Option<IpAddr> {
    addr.split('%').next()?.parse().ok()
}

#[cfg(target_os = "macos")]
async fn scutil_dns() -> Result<Vec<IpAddr>> {
    let output = tokio::process::Command::new("scutil")
        .arg("--dns")
        .output()
        .await
        .map_err(|e| IpiError::CommandFailed {
            command: "scutil --dns".into(),
            message: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_default_dns(&stdout))
}

/// Parse default DNS from scutil output (the nameservers of resolver #1).
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_default_dns(output: &str) -> Vec<IpAddr> {
    let mut dns_servers = Vec::new();
    let mut in_default_resolver = false;

    for line in output.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("resolver #1") && !in_default_resolver {
            in_default_resolver = true;
        } else if trimmed.starts_with("resolver #") && in_default_resolver {
            // Later resolvers are scoped or per-domain
            break;
        }

        if in_default_resolver && trimmed.starts_with("nameserver[") {
            // Format: "nameserver[0] : 10.8.0.1"
            if let Some(server) = trimmed
                .find(" : ")
                .and_then(|pos| parse_scoped(trimmed[pos + 3..].trim()))
            {
                if !dns_servers.contains(&server) {
                    dns_servers.push(server);
                }
            }
        }
    }

    dns_servers
}

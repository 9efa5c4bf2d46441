//! Default gateway discovery from the OS routing table.
//!
//! Linux reads `/proc/net/route` and `/proc/net/ipv6_route` directly, falling
//! back to `ip route`. Other Unix systems ask `route -n get default`.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use tokio::process::Command;

use crate::error::{IpiError, Result};

const RTF_GATEWAY: u32 = 0x0002;

/// Next hop of the IPv4 default route.
pub async fn default_gateway() -> Result<Ipv4Addr> {
    #[cfg(target_os = "linux")]
    {
        match tokio::fs::read_to_string("/proc/net/route").await {
            Ok(table) => {
                if let Some(gw) = parse_proc_net_route(&table) {
                    return Ok(gw);
                }
            }
            Err(e) => tracing::debug!(error = %e, "cannot read /proc/net/route"),
        }

        let stdout = run("ip", &["-4", "route", "show", "default"]).await?;
        match parse_ip_route_default(&stdout) {
            Some(IpAddr::V4(gw)) => Ok(gw),
            _ => Err(IpiError::NotFound("no IPv4 default route".into())),
        }
    }

    #[cfg(not(target_os = "linux"))]
    {
        let stdout = run("route", &["-n", "get", "default"]).await?;
        match parse_route_get(&stdout) {
            Some(IpAddr::V4(gw)) => Ok(gw),
            _ => Err(IpiError::NotFound("no IPv4 default route".into())),
        }
    }
}

/// Next hop of the IPv6 default route.
pub async fn default_gateway_v6() -> Result<Ipv6Addr> {
    #[cfg(target_os = "linux")]
    {
        let table = tokio::fs::read_to_string("/proc/net/ipv6_route").await?;
        parse_proc_ipv6_route(&table)
            .ok_or_else(|| IpiError::NotFound("no IPv6 default route".into()))
    }

    #[cfg(not(target_os = "linux"))]
    {
        let stdout = run("route", &["-n", "get", "-inet6", "default"]).await?;
        match parse_route_get(&stdout) {
            Some(IpAddr::V6(gw)) => Ok(gw),
            _ => Err(IpiError::NotFound("no IPv6 default route".into())),
        }
    }
}

async fn run(program: &str, args: &[&str]) -> Result<String> {
    let command = format!("{} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| IpiError::CommandFailed {
            command: command.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(IpiError::CommandFailed {
            command,
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `/proc/net/route`.
///
/// Columns: Iface Destination Gateway Flags ... with addresses as
/// little-endian hex. The default route has destination `00000000`.
fn parse_proc_net_route(table: &str) -> Option<Ipv4Addr> {
    table.lines().skip(1).find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 || fields[1] != "00000000" {
            return None;
        }

        let flags = u32::from_str_radix(fields[3], 16).ok()?;
        if flags & RTF_GATEWAY == 0 {
            return None;
        }

        let gateway = u32::from_str_radix(fields[2], 16).ok()?;
        Some(Ipv4Addr::from(gateway.to_le_bytes()))
    })
}

/// Parse `/proc/net/ipv6_route`.
///
/// Columns: dest dest_plen src src_plen next_hop metric refcnt use flags iface,
/// addresses as 32 hex digits in network order.
fn parse_proc_ipv6_route(table: &str) -> Option<Ipv6Addr> {
    table.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 10 || fields[1] != "00" {
            return None;
        }

        let dest = u128::from_str_radix(fields[0], 16).ok()?;
        let next_hop = u128::from_str_radix(fields[4], 16).ok()?;
        if dest != 0 || next_hop == 0 {
            return None;
        }

        Some(Ipv6Addr::from(next_hop))
    })
}

/// Parse `ip route show default`: `default via 192.168.1.1 dev eth0 ...`.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_ip_route_default(output: &str) -> Option<IpAddr> {
    output.lines().find_map(|line| {
        let mut words = line.split_whitespace();
        if words.next()? != "default" {
            return None;
        }
        words
            .skip_while(|w| *w != "via")
            .nth(1)
            .and_then(|addr| addr.parse().ok())
    })
}

/// Parse `route -n get default` (BSD/macOS): `    gateway: 192.168.1.1`.
#[cfg_attr(target_os = "linux", allow(dead_code))]
fn parse_route_get(output: &str) -> Option<IpAddr> {
    output.lines().find_map(|line| {
        let value = line.trim().strip_prefix("gateway:")?.trim();
        // Link-local IPv6 gateways carry a zone: fe80::1%en0
        let addr = value.split('%').next()?;
        addr.parse().ok()
    })
}

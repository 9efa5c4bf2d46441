//! Local-facing address discovery via an unsent UDP "connection".

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;

use crate::error::{IpiError, Result};
use crate::snapshot::Lookup;

/// Infer the address this host uses to reach the outside world.
///
/// Connecting a UDP socket only selects a route; no datagram is sent.
/// The IPv4 target is tried first, then the IPv6 one.
///
/// Returns `Err` only when no UDP socket can be bound in either family,
/// which means the environment has no usable network stack at all.
pub async fn discover_local_ip(
    bind_v4: SocketAddr,
    bind_v6: SocketAddr,
    target_v4: &str,
    target_v6: &str,
) -> Result<Lookup<IpAddr>> {
    let v4 = UdpSocket::bind(bind_v4).await;
    let v6 = UdpSocket::bind(bind_v6).await;

    let (v4, v6) = match (v4, v6) {
        (Err(e), Err(_)) => return Err(IpiError::NoSocket(e)),
        (v4, v6) => (v4.ok(), v6.ok()),
    };

    let mut reason = String::from("no route to target address");

    for (socket, target) in [(v4, target_v4), (v6, target_v6)] {
        let Some(socket) = socket else { continue };
        match route_via(&socket, target).await {
            Ok(ip) => return Ok(Lookup::Found(ip)),
            Err(e) => {
                tracing::debug!(addr = target, error = %e, "route lookup failed");
                reason = e.to_string();
            }
        }
    }

    Ok(Lookup::Unavailable(reason))
}

async fn route_via(socket: &UdpSocket, target: &str) -> Result<IpAddr> {
    socket.connect(target).await?;
    let ip = socket.local_addr()?.ip();
    if ip.is_unspecified() {
        return Err(IpiError::NotFound(format!("no local address for route to {target}")));
    }
    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn any() -> (SocketAddr, SocketAddr) {
        ("0.0.0.0:0".parse().unwrap(), "[::]:0".parse().unwrap())
    }

    #[tokio::test]
    async fn test_loopback_route_yields_valid_address() {
        let (v4, v6) = any();
        let lookup = discover_local_ip(v4, v6, "127.0.0.1:9", "[::1]:9")
            .await
            .unwrap();
        let ip = *lookup.found().expect("loopback route should always exist");
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert!(ip.to_string().parse::<IpAddr>().is_ok());
    }

    #[tokio::test]
    async fn test_bad_targets_degrade_to_unavailable() {
        let (v4, v6) = any();
        let lookup = discover_local_ip(v4, v6, "not-an-address", "also-not-an-address")
            .await
            .unwrap();
        assert!(!lookup.is_found());
    }

    #[tokio::test]
    async fn test_unbindable_sockets_are_fatal() {
        // Neither address is assigned to a local interface.
        let v4: SocketAddr = "198.51.100.254:0".parse().unwrap();
        let v6: SocketAddr = "[2001:db8:ffff::fe]:0".parse().unwrap();
        let err = discover_local_ip(v4, v6, "127.0.0.1:9", "[::1]:9")
            .await
            .unwrap_err();
        assert!(matches!(err, IpiError::NoSocket(_)));
    }
}

//! Network interface enumeration.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Information about a network interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub ipv4_address: Option<Ipv4Addr>,
    pub netmask: Option<Ipv4Addr>,
    pub ipv6_addresses: Vec<Ipv6Addr>,
    pub mac: Option<String>,
    pub is_up: bool,
    pub is_loopback: bool,
    pub has_broadcast: bool,
}

impl InterfaceInfo {
    /// Directed broadcast address of the IPv4 subnet.
    pub fn broadcast(&self) -> Option<Ipv4Addr> {
        if !self.has_broadcast {
            return None;
        }
        let ip = u32::from(self.ipv4_address?);
        let mask = u32::from(self.netmask?);
        Some(Ipv4Addr::from(ip | !mask))
    }

    /// Preferred IPv6 address: a global one if present, else link-local.
    pub fn ipv6_address(&self) -> Option<Ipv6Addr> {
        self.ipv6_addresses
            .iter()
            .find(|ip| !is_link_local(ip))
            .or_else(|| self.ipv6_addresses.first())
            .copied()
    }

    fn holds(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.ipv4_address == Some(v4),
            IpAddr::V6(v6) => self.ipv6_addresses.contains(&v6),
        }
    }
}

/// `fe80::/10`
pub fn is_link_local(ip: &Ipv6Addr) -> bool {
    (ip.segments()[0] & 0xffc0) == 0xfe80
}

/// The interface that owns `ip`.
pub fn interface_for(interfaces: &[InterfaceInfo], ip: IpAddr) -> Option<&InterfaceInfo> {
    interfaces.iter().find(|iface| iface.holds(ip))
}

/// First non-loopback interface that is up and has an IPv4 address.
pub fn primary_interface(interfaces: &[InterfaceInfo]) -> Option<&InterfaceInfo> {
    interfaces
        .iter()
        .find(|iface| !iface.is_loopback && iface.is_up && iface.ipv4_address.is_some())
}

/// Enumerate interfaces in the order the OS reports them.
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    netdev::get_interfaces().iter().map(InterfaceInfo::from).collect()
}

impl From<&netdev::Interface> for InterfaceInfo {
    fn from(iface: &netdev::Interface) -> Self {
        let ipv4 = iface.ipv4.first();
        Self {
            name: iface.name.clone(),
            ipv4_address: ipv4.map(|net| net.addr()),
            netmask: ipv4.map(|net| net.netmask()),
            ipv6_addresses: iface.ipv6.iter().map(|net| net.addr()).collect(),
            mac: iface
                .mac_addr
                .as_ref()
                .and_then(|mac| hardware_address(&mac.to_string())),
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
            has_broadcast: iface.is_broadcast(),
        }
    }
}

/// Lower-case `aa:bb:cc:dd:ee:ff`, or `None` for an empty or all-zero address.
fn hardware_address(mac: &str) -> Option<String> {
    if mac.chars().all(|c| c == '0' || c == ':') {
        return None;
    }
    Some(mac.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, ip: Option<[u8; 4]>, up: bool, loopback: bool) -> InterfaceInfo {
        InterfaceInfo {
            name: name.to_string(),
            ipv4_address: ip.map(Ipv4Addr::from),
            netmask: Some(Ipv4Addr::new(255, 255, 255, 0)),
            is_up: up,
            is_loopback: loopback,
            has_broadcast: !loopback,
            ..Default::default()
        }
    }

    #[test]
    fn test_broadcast_from_netmask() {
        let en0 = iface("en0", Some([192, 168, 2, 17]), true, false);
        assert_eq!(en0.broadcast(), Some(Ipv4Addr::new(192, 168, 2, 255)));

        let lo = iface("lo", Some([127, 0, 0, 1]), true, true);
        assert_eq!(lo.broadcast(), None);
    }

    #[test]
    fn test_primary_interface_skips_loopback_and_down() {
        let interfaces = vec![
            iface("lo", Some([127, 0, 0, 1]), true, true),
            iface("eth1", Some([10, 0, 0, 2]), false, false),
            iface("wlan0", None, true, false),
            iface("eth0", Some([192, 168, 1, 5]), true, false),
        ];
        assert_eq!(primary_interface(&interfaces).unwrap().name, "eth0");
        assert_eq!(
            interface_for(&interfaces, "10.0.0.2".parse().unwrap())
                .unwrap()
                .name,
            "eth1"
        );
        assert!(interface_for(&interfaces, "10.9.9.9".parse().unwrap()).is_none());
    }

    #[test]
    fn test_ipv6_prefers_global() {
        let mut en0 = iface("en0", None, true, false);
        en0.ipv6_addresses = vec!["fe80::1".parse().unwrap(), "2001:db8::5".parse().unwrap()];
        assert_eq!(en0.ipv6_address(), Some("2001:db8::5".parse().unwrap()));

        en0.ipv6_addresses.truncate(1);
        assert_eq!(en0.ipv6_address(), Some("fe80::1".parse().unwrap()));
    }

    #[test]
    fn test_hardware_address() {
        assert_eq!(
            hardware_address("00:11:22:AA:BB:CC"),
            Some("00:11:22:aa:bb:cc".to_string())
        );
        assert_eq!(hardware_address("00:00:00:00:00:00"), None);
        assert_eq!(hardware_address(""), None);
    }

    #[test]
    fn test_link_local_range() {
        assert!(is_link_local(&"fe80::1".parse().unwrap()));
        assert!(is_link_local(&"febf::1".parse().unwrap()));
        assert!(!is_link_local(&"fec0::1".parse().unwrap()));
        assert!(!is_link_local(&"2001:db8::1".parse().unwrap()));
    }

    #[test]
    fn test_list_interfaces_includes_loopback() {
        let interfaces = list_interfaces();
        let lo = interfaces
            .iter()
            .find(|i| i.is_loopback)
            .expect("loopback interface");
        assert!(lo.mac.is_none());
    }
}

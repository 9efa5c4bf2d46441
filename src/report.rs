//! Turns a snapshot into the labeled rows the table shows.

use std::fmt::Display;

use crate::snapshot::{InterfaceDetails, Lookup, NetworkSnapshot};
use crate::system::ipv6_servers;

/// Text shown for any lookup that failed.
pub const UNAVAILABLE: &str = "unavailable";

/// One labeled line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: String,
    pub available: bool,
}

impl ReportRow {
    fn new<T>(label: &'static str, lookup: &Lookup<T>, render: impl FnOnce(&T) -> String) -> Self {
        match lookup {
            Lookup::Found(value) => Self {
                label,
                value: render(value),
                available: true,
            },
            Lookup::Unavailable(_) => Self {
                label,
                value: UNAVAILABLE.to_string(),
                available: false,
            },
        }
    }

    fn display<T: Display>(label: &'static str, lookup: &Lookup<T>) -> Self {
        Self::new(label, lookup, |value| value.to_string())
    }

    /// Append ` - Ping: <rtt>` when a ping was attempted.
    fn with_ping(mut self, ping: Option<&Lookup<String>>) -> Self {
        match ping {
            Some(Lookup::Found(rtt)) => self.value.push_str(&format!(" - Ping: {}", rtt)),
            Some(Lookup::Unavailable(_)) => self.value.push_str(" - Ping: no response"),
            None => {}
        }
        self
    }
}

/// Table title, naming the host when known.
pub fn title(snapshot: &NetworkSnapshot) -> String {
    match &snapshot.hostname {
        Some(host) => format!("Network Information ({})", host),
        None => "Network Information".to_string(),
    }
}

/// Build the rows: the four core rows first, then any requested extras.
pub fn rows(snapshot: &NetworkSnapshot) -> Vec<ReportRow> {
    let pings = &snapshot.pings;

    let mut rows = vec![
        ReportRow::new("Local IP", &snapshot.local_ip, |local| match &local.interface {
            Some(iface) => format!("{} ({})", local.ip, iface),
            None => local.ip.to_string(),
        })
        .with_ping(pings.local.as_ref()),
        ReportRow::display("External IP", &snapshot.external_ip)
            .with_ping(pings.external.as_ref()),
        ReportRow::display("Gateway IP", &snapshot.gateway_ip).with_ping(pings.gateway.as_ref()),
        ReportRow::new("DNS Servers", &snapshot.dns_servers, |servers| join(servers)),
    ];

    if let Some(details) = &snapshot.details {
        rows.extend(detail_rows(details, snapshot));
    }

    if let Some(latency) = &snapshot.latency {
        rows.push(ReportRow::display("Latency", latency));
    }

    rows
}

fn detail_rows(details: &InterfaceDetails, snapshot: &NetworkSnapshot) -> Vec<ReportRow> {
    vec![
        ReportRow::display("Interface", &details.interface),
        ReportRow::display("Subnet Mask", &details.subnet_mask),
        ReportRow::display("Broadcast Address", &details.broadcast),
        ReportRow::display("MAC Address", &details.mac),
        ReportRow::display("IPv6 Address", &details.ipv6).with_ping(snapshot.pings.ipv6.as_ref()),
        ReportRow::display("IPv6 Gateway", &details.ipv6_gateway),
        ReportRow::new("IPv6 DNS Servers", &snapshot.dns_servers, |servers| {
            let v6 = ipv6_servers(servers);
            if v6.is_empty() {
                "none".to_string()
            } else {
                join(&v6)
            }
        }),
        ReportRow::display("Signal Strength", &details.signal),
    ]
}

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{LocalAddress, PingResults, SignalStrength};

    const CORE_LABELS: [&str; 4] = ["Local IP", "External IP", "Gateway IP", "DNS Servers"];

    fn online() -> NetworkSnapshot {
        NetworkSnapshot {
            hostname: Some("box".to_string()),
            local_ip: Lookup::Found(LocalAddress {
                ip: "192.168.1.5".parse().unwrap(),
                interface: Some("eth0".to_string()),
            }),
            external_ip: Lookup::Found("203.0.113.7".parse().unwrap()),
            gateway_ip: Lookup::Found("192.168.1.1".parse().unwrap()),
            dns_servers: Lookup::Found(vec![
                "192.168.1.1".parse().unwrap(),
                "2001:db8::53".parse().unwrap(),
            ]),
            details: None,
            pings: PingResults::default(),
            latency: None,
        }
    }

    fn labels(rows: &[ReportRow]) -> Vec<&str> {
        rows.iter().map(|row| row.label).collect()
    }

    #[test]
    fn test_four_rows_when_everything_fails() {
        let rows = rows(&NetworkSnapshot::unavailable("offline"));
        assert_eq!(labels(&rows), CORE_LABELS);
        assert!(rows.iter().all(|row| row.value == UNAVAILABLE && !row.available));
    }

    #[test]
    fn test_four_rows_when_everything_succeeds() {
        let rows = rows(&online());
        assert_eq!(labels(&rows), CORE_LABELS);
        assert_eq!(rows[0].value, "192.168.1.5 (eth0)");
        assert_eq!(rows[1].value, "203.0.113.7");
        assert_eq!(rows[2].value, "192.168.1.1");
        assert_eq!(rows[3].value, "192.168.1.1, 2001:db8::53");
    }

    #[test]
    fn test_four_rows_with_mixed_results() {
        let mut snapshot = online();
        snapshot.external_ip = Lookup::unavailable("timed out");
        let rows = rows(&snapshot);
        assert_eq!(labels(&rows), CORE_LABELS);
        assert_eq!(rows[1].value, UNAVAILABLE);
        assert!(rows[0].available);
    }

    #[test]
    fn test_ping_suffix() {
        let mut snapshot = online();
        snapshot.pings.local = Some(Lookup::Found("0.045 ms".to_string()));
        snapshot.pings.gateway = Some(Lookup::unavailable("no response"));
        let rows = rows(&snapshot);
        assert_eq!(rows[0].value, "192.168.1.5 (eth0) - Ping: 0.045 ms");
        assert_eq!(rows[1].value, "203.0.113.7");
        assert_eq!(rows[2].value, "192.168.1.1 - Ping: no response");
    }

    #[test]
    fn test_detail_and_latency_rows_follow_core_rows() {
        let mut snapshot = online();
        snapshot.details = Some(InterfaceDetails {
            interface: Lookup::Found("eth0".to_string()),
            subnet_mask: Lookup::Found("255.255.255.0".parse().unwrap()),
            broadcast: Lookup::Found("192.168.1.255".parse().unwrap()),
            mac: Lookup::Found("00:11:22:33:44:55".to_string()),
            ipv6: Lookup::unavailable("none"),
            ipv6_gateway: Lookup::unavailable("none"),
            signal: Lookup::Found(SignalStrength { dbm: -56 }),
        });
        snapshot.latency = Some(Lookup::Found("9.8/11.2/12.3/0.9 ms".to_string()));

        let rows = rows(&snapshot);
        assert_eq!(&labels(&rows)[..4], CORE_LABELS);
        assert_eq!(rows.len(), 4 + 8 + 1);

        let value = |label: &str| {
            rows.iter()
                .find(|row| row.label == label)
                .map(|row| row.value.as_str())
                .unwrap()
        };
        assert_eq!(value("Broadcast Address"), "192.168.1.255");
        assert_eq!(value("IPv6 DNS Servers"), "2001:db8::53");
        assert_eq!(value("IPv6 Gateway"), UNAVAILABLE);
        assert_eq!(value("Signal Strength"), "-56 dBm (88%)");
        assert_eq!(value("Latency"), "9.8/11.2/12.3/0.9 ms");
    }

    #[test]
    fn test_title_names_host() {
        assert_eq!(title(&online()), "Network Information (box)");
        assert_eq!(
            title(&NetworkSnapshot::unavailable("x")),
            "Network Information"
        );
    }
}

//! System interaction modules for addresses, routes, resolvers and reachability.

pub mod dns;
pub mod external;
pub mod gateway;
pub mod host;
pub mod local;
pub mod network;
pub mod ping;
pub mod wireless;

pub use dns::{ipv6_servers, system_dns};
pub use external::EchoClient;
pub use gateway::{default_gateway, default_gateway_v6};
pub use host::hostname;
pub use local::discover_local_ip;
pub use network::{interface_for, is_link_local, list_interfaces, primary_interface, InterfaceInfo};
pub use ping::{measure_latency, ping};
pub use wireless::signal_strength;

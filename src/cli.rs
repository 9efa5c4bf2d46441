use std::path::PathBuf;

#[derive(clap::Parser, Debug)]
/// Show local, external, gateway and DNS addresses.
///
/// Without options, prints exactly four rows: local IP, external IP, gateway IP and DNS servers.
pub struct Args {
    /// Add interface details: subnet mask, broadcast, MAC, IPv6 address/gateway/DNS and Wi-Fi signal
    #[clap(short, long)]
    pub details: bool,
    /// Ping the local, external and gateway addresses and show the round-trip time
    #[clap(short, long)]
    pub ping: bool,
    /// Measure latency to a remote host (4 pings)
    #[clap(long)]
    pub latency: bool,
    /// Host used by --latency
    #[clap(long, value_name = "HOST")]
    pub latency_target: Option<String>,
    /// Ping timeout in seconds
    #[clap(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,
    /// URL of the IP echo service used for the external address
    #[clap(long, value_name = "URL")]
    pub echo_url: Option<String>,
    /// HTTP timeout in seconds for the echo service
    #[clap(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,
    /// Remote address used to pick the outgoing IPv4 route
    #[clap(long, value_name = "ADDR:PORT")]
    pub route_v4: Option<String>,
    /// Remote address used to pick the outgoing IPv6 route
    #[clap(long, value_name = "ADDR:PORT")]
    pub route_v6: Option<String>,
    /// Also append the table to this file
    #[clap(short, long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,
    /// Make logging output more verbose. By default only errors are logged;
    /// -v adds info, -vv debug, -vvv trace. Logs go to stderr.
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter directive for the requested verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

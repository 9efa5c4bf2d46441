//! Round-trip measurements with the system `ping` binary.

use std::net::IpAddr;

use tokio::process::Command;

use crate::error::{IpiError, Result};

/// Send one echo request and return the reported time, e.g. `"0.045 ms"`.
pub async fn ping(addr: IpAddr, timeout_secs: u64) -> Result<String> {
    let stdout = run_ping(&addr.to_string(), addr.is_ipv6(), 1, timeout_secs).await?;
    parse_ping_time(&stdout)
        .ok_or_else(|| IpiError::ParseError("no time= field in ping output".into()))
}

/// Send four echo requests to `host` and return the `min/avg/max/...` summary.
pub async fn measure_latency(host: &str, timeout_secs: u64) -> Result<String> {
    let stdout = run_ping(host, false, 4, timeout_secs).await?;
    parse_rtt_summary(&stdout)
        .ok_or_else(|| IpiError::ParseError("no rtt summary in ping output".into()))
}

async fn run_ping(target: &str, ipv6: bool, count: u32, timeout_secs: u64) -> Result<String> {
    let (program, wait) = ping_invocation(ipv6, timeout_secs);
    let count = count.to_string();
    let args = ["-c", count.as_str(), "-W", wait.as_str(), target];

    tracing::debug!(program, ?args, "running ping");

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| IpiError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(IpiError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            message: "no response".into(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Program name and `-W` value for this platform.
///
/// Linux `ping` handles both families and takes seconds; macOS needs
/// `ping6` for IPv6 and takes milliseconds.
fn ping_invocation(ipv6: bool, timeout_secs: u64) -> (&'static str, String) {
    let timeout_secs = timeout_secs.max(1);
    if cfg!(target_os = "macos") {
        let program = if ipv6 { "ping6" } else { "ping" };
        (program, (timeout_secs * 1000).to_string())
    } else {
        ("ping", timeout_secs.to_string())
    }
}

/// `64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=12.3 ms` -> `12.3 ms`.
fn parse_ping_time(output: &str) -> Option<String> {
    let start = output.find("time=")? + "time=".len();
    let rest = &output[start..];
    let value = rest.split_whitespace().next()?;
    Some(format!("{} ms", value.trim_end_matches("ms")))
}

/// Linux: `rtt min/avg/max/mdev = 9.8/11.2/12.3/0.9 ms`
/// macOS: `round-trip min/avg/max/stddev = 9.8/11.2/12.3/0.9 ms`
fn parse_rtt_summary(output: &str) -> Option<String> {
    output
        .lines()
        .find(|line| line.contains("min/avg/max"))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ping_time() {
        let output = "PING 192.168.1.1 (192.168.1.1) 56(84) bytes of data.
64 bytes from 192.168.1.1: icmp_seq=1 ttl=64 time=0.045 ms

--- 192.168.1.1 ping statistics ---
1 packets transmitted, 1 received, 0% packet loss, time 0ms
rtt min/avg/max/mdev = 0.045/0.045/0.045/0.000 ms
";
        assert_eq!(parse_ping_time(output), Some("0.045 ms".to_string()));
        assert_eq!(parse_ping_time("Request timeout for icmp_seq 0"), None);
    }

    #[test]
    fn test_parse_rtt_summary() {
        let linux = "rtt min/avg/max/mdev = 9.8/11.2/12.3/0.9 ms\n";
        assert_eq!(
            parse_rtt_summary(linux),
            Some("9.8/11.2/12.3/0.9 ms".to_string())
        );

        let macos = "round-trip min/avg/max/stddev = 14.1/15.0/16.2/0.8 ms\n";
        assert_eq!(
            parse_rtt_summary(macos),
            Some("14.1/15.0/16.2/0.8 ms".to_string())
        );

        assert_eq!(parse_rtt_summary("4 packets transmitted, 0 received"), None);
    }

    #[test]
    fn test_ping_invocation_has_positive_wait() {
        let (program, wait) = ping_invocation(false, 0);
        assert_eq!(program, "ping");
        assert_ne!(wait, "0");
    }
}

//! Wi-Fi signal level.

use crate::error::{IpiError, Result};
use crate::snapshot::SignalStrength;

/// Current signal level of a wireless interface.
#[cfg(target_os = "linux")]
pub async fn signal_strength(interface: &str) -> Result<SignalStrength> {
    let contents = tokio::fs::read_to_string("/proc/net/wireless").await?;
    parse_wireless(&contents, interface)
        .ok_or_else(|| IpiError::NotFound(format!("{} is not a wireless interface", interface)))
}

#[cfg(not(target_os = "linux"))]
pub async fn signal_strength(interface: &str) -> Result<SignalStrength> {
    Err(IpiError::NotFound(format!(
        "signal level of {} is not readable on this platform",
        interface
    )))
}

/// Parse `/proc/net/wireless`:
///
/// ```text
/// Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
///  face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
///  wlan0: 0000   54.  -56.  -256        0      0      0      0      0        0
/// ```
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_wireless(contents: &str, interface: &str) -> Option<SignalStrength> {
    contents.lines().skip(2).find_map(|line| {
        let (name, rest) = line.trim().split_once(':')?;
        if name != interface {
            return None;
        }
        let level = rest.split_whitespace().nth(2)?;
        let dbm = level.trim_end_matches('.').parse::<f32>().ok()?;
        Some(SignalStrength { dbm: dbm.round() as i32 })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  nwid  crypt   frag  retry   misc | beacon | 22
 wlan0: 0000   54.  -56.  -256        0      0      0      0      0        0
";

    #[test]
    fn test_parse_wireless() {
        assert_eq!(
            parse_wireless(SAMPLE, "wlan0"),
            Some(SignalStrength { dbm: -56 })
        );
        assert_eq!(parse_wireless(SAMPLE, "eth0"), None);
    }
}

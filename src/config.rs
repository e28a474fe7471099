//! Run configuration parsing.

use std::time::Duration;

use anyhow::Context;

/// Parse a run duration like "90", "300s", "30m", "1h" into a [`Duration`].
/// Plain numbers are seconds.
///
/// A malformed or zero duration is a fatal configuration error, surfaced
/// before any workload starts.
pub fn parse_run_duration(s: &str) -> anyhow::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        anyhow::bail!("empty duration string");
    }

    let (value, unit_secs) = if let Some(num) = s.strip_suffix('h') {
        (num, 3600)
    } else if let Some(num) = s.strip_suffix('m') {
        (num, 60)
    } else if let Some(num) = s.strip_suffix('s') {
        (num, 1)
    } else {
        (s, 1)
    };

    let value: u64 = value
        .parse()
        .with_context(|| format!("invalid duration value: {s}"))?;
    if value == 0 {
        anyhow::bail!("duration must be positive: {s}");
    }

    Ok(Duration::from_secs(value * unit_secs))
}

//! Timestamp formatting with a configurable UTC offset.
//!
//! The bot displays timestamps in the guild's local time (configured in
//! settings as an offset such as `+03:30`); storage records them already
//! formatted, matching the original snapshot layout.

use std::sync::RwLock;

use chrono::{DateTime, FixedOffset, Utc};

use crate::error::{Result, StorageError};

static TIMEZONE: RwLock<Option<FixedOffset>> = RwLock::new(None);

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parses an offset like `+03:30`, `-05:00`, or `Z` and makes it the
/// display timezone for all subsequently formatted timestamps.
pub fn configure_timezone(offset: &str) -> Result<()> {
    let parsed = parse_offset(offset)
        .ok_or_else(|| StorageError::InvalidTimezone(offset.to_string()))?;
    *TIMEZONE.write().expect("timezone lock poisoned") = Some(parsed);
    Ok(())
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match raw.as_bytes()[0] {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => (1, raw),
    };
    let mut parts = rest.splitn(2, ':');
    let hours: i32 = parts.next()?.parse().ok()?;
    let minutes: i32 = parts.next().unwrap_or("0").parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn active_offset() -> FixedOffset {
    TIMEZONE
        .read()
        .expect("timezone lock poisoned")
        .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap())
}

/// Formats an instant as `YYYY-MM-DD HH:MM` in the configured timezone.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&active_offset())
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Current time, formatted for display and snapshot storage.
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offset_parsing_accepts_common_shapes() {
        assert!(parse_offset("+03:30").is_some());
        assert!(parse_offset("-05:00").is_some());
        assert!(parse_offset("Z").is_some());
        assert!(parse_offset("04").is_some());
        assert!(parse_offset("nonsense").is_none());
        assert!(parse_offset("+25:00").is_none());
    }

    #[test]
    fn format_uses_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let offset = parse_offset("+03:30").unwrap();
        let local = instant.with_timezone(&offset).format(TIMESTAMP_FORMAT);
        assert_eq!(local.to_string(), "2024-01-01 15:30");
    }
}

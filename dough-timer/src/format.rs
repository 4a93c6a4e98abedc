use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Countdown shown before the first recheck, and in the idle status line.
pub const PLACEHOLDER: &str = "--:--:--";

/// Formats milliseconds as `HH:MM:SS`.
///
/// Floors to whole seconds and clamps negatives to zero. Hours are never
/// wrapped into days, so long batches read like `240:00:00`.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Abbreviated weekday and clock time of `end_time_ms` at `offset`,
/// e.g. `Fri 3:05 PM`.
pub fn format_ready_time(end_time_ms: i64, offset: UtcOffset) -> String {
    let format = format_description!("[weekday repr:short] [hour repr:12 padding:none]:[minute] [period]");

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(end_time_ms) * 1_000_000)
        .ok()
        // keep away from the representable edge before shifting the offset
        .filter(|dt| dt.year().abs() < 9999)
        .and_then(|dt| dt.to_offset(offset).format(format).ok())
        .unwrap_or_else(|| "--".to_string())
}

//! X-axis tick label formatting.

use chrono::{DateTime, Local, TimeDelta};

use crate::config::XAxisFormat;

/// Format a sample time (seconds since `origin`) as an axis label.
pub fn format_x(seconds: f64, format: XAxisFormat, origin: DateTime<Local>) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    match format {
        XAxisFormat::Seconds => {
            if seconds.fract() == 0.0 {
                format!("{seconds:.0} s")
            } else {
                format!("{seconds:.1} s")
            }
        }
        XAxisFormat::WallClock => {
            // Out-of-range offsets have no wall-clock time.
            TimeDelta::try_milliseconds((seconds * 1000.0).round() as i64)
                .and_then(|offset| origin.checked_add_signed(offset))
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default()
        }
    }
}

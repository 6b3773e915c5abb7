use chrono::Timelike;

use crate::core::TimeLabelGranularity;
use crate::core::primitives::unix_millis_to_datetime;

/// Time-axis label for a bar opening at `time_ms`.
///
/// Intraday labels show the clock time, switching to the date at midnight.
#[must_use]
pub fn format_time_axis_label(time_ms: i64, granularity: TimeLabelGranularity) -> String {
    let Some(time) = unix_millis_to_datetime(time_ms) else {
        return "-".to_owned();
    };
    let pattern = match granularity {
        TimeLabelGranularity::Intraday if time.hour() == 0 && time.minute() == 0 => "%b %d",
        TimeLabelGranularity::Intraday => "%H:%M",
        TimeLabelGranularity::Daily => "%b %d",
        TimeLabelGranularity::Monthly => "%b %Y",
    };
    time.format(pattern).to_string()
}

/// Full timestamp shown in the crosshair time badge.
#[must_use]
pub fn format_crosshair_time(time_ms: i64, granularity: TimeLabelGranularity) -> String {
    let Some(time) = unix_millis_to_datetime(time_ms) else {
        return "-".to_owned();
    };
    let pattern = match granularity {
        TimeLabelGranularity::Intraday => "%b %d, %H:%M",
        TimeLabelGranularity::Daily | TimeLabelGranularity::Monthly => "%b %d, %Y",
    };
    time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_crosshair_time, format_time_axis_label};
    use crate::core::TimeLabelGranularity;

    // 2024-03-05T14:30:00Z
    const AFTERNOON_MS: i64 = 1_709_649_000_000;
    // 2024-03-05T00:00:00Z
    const MIDNIGHT_MS: i64 = 1_709_596_800_000;

    #[test]
    fn intraday_labels_show_clock_time() {
        assert_eq!(
            format_time_axis_label(AFTERNOON_MS, TimeLabelGranularity::Intraday),
            "14:30"
        );
        assert_eq!(
            format_time_axis_label(MIDNIGHT_MS, TimeLabelGranularity::Intraday),
            "Mar 05"
        );
    }

    #[test]
    fn coarse_labels_show_dates() {
        assert_eq!(
            format_time_axis_label(AFTERNOON_MS, TimeLabelGranularity::Daily),
            "Mar 05"
        );
        assert_eq!(
            format_time_axis_label(AFTERNOON_MS, TimeLabelGranularity::Monthly),
            "Mar 2024"
        );
        assert_eq!(
            format_crosshair_time(AFTERNOON_MS, TimeLabelGranularity::Intraday),
            "Mar 05, 14:30"
        );
    }

    #[test]
    fn out_of_range_time_falls_back_to_dash() {
        assert_eq!(
            format_time_axis_label(i64::MAX, TimeLabelGranularity::Daily),
            "-"
        );
    }
}

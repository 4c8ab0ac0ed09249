use chrono::{DateTime, Datelike, Timelike};

const HOUR_MS: u64 = 60 * 60 * 1000;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Format a timestamp for the time axis, with granularity following the
/// visible span (both in milliseconds, UTC):
///
/// - span under two days -> `HH:MM`
/// - span under ~three months -> `DD.MM`
/// - anything wider -> `MM.YYYY`
pub fn format_time_label(timestamp: u64, visible_span: u64) -> String {
    let Some(date) = DateTime::from_timestamp_millis(timestamp as i64) else {
        return String::from("--");
    };
    if visible_span < 2 * DAY_MS {
        format!("{:02}:{:02}", date.hour(), date.minute())
    } else if visible_span < 90 * DAY_MS {
        format!("{:02}.{:02}", date.day(), date.month())
    } else {
        format!("{:02}.{}", date.month(), date.year())
    }
}

#[cfg(test)]
mod tests {
    use super::{DAY_MS, format_time_label};

    #[test]
    fn granularity_follows_visible_span() {
        // 2021-03-04 05:06:07 UTC
        let ts = 1_614_834_367_000u64;
        assert_eq!(format_time_label(ts, DAY_MS), "05:06");
        assert_eq!(format_time_label(ts, 10 * DAY_MS), "04.03");
        assert_eq!(format_time_label(ts, 200 * DAY_MS), "03.2021");
    }

    #[test]
    fn epoch_formats_without_panicking() {
        assert_eq!(format_time_label(0, DAY_MS), "00:00");
    }
}

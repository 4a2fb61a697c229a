//! Local civil time and time-of-day bucketing
//!
//! The weather API reports an observation timestamp (`dt`, UTC seconds) and
//! the location's UTC offset (`timezone`, seconds). Local civil time is the
//! sum of the two interpreted as a naive timestamp; the time-of-day bucket is
//! derived from its hour.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Coarse time-of-day bucket derived from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket a local hour (0..=23).
    ///
    /// Morning [5,12), Afternoon [12,17), Evening [17,21), Night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
            TimeOfDay::Night => "Night",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local civil time from a UTC unix timestamp plus a UTC offset in seconds.
///
/// Returns `None` when the sum overflows or is out of chrono's range.
pub fn local_civil_time(unix_utc: i64, offset_seconds: i64) -> Option<NaiveDateTime> {
    let shifted = unix_utc.checked_add(offset_seconds)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.naive_utc())
}

/// Format a local civil time as `YYYY-MM-DD HH:MM:SS`.
pub fn format_local_time(local: &NaiveDateTime) -> String {
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Time-of-day bucket for a local civil time.
pub fn bucket_for(local: &NaiveDateTime) -> TimeOfDay {
    TimeOfDay::from_hour(local.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(hour: u32, minute: u32) -> NaiveDateTime {
        // Offset-free reference day; only the clock matters for bucketing
        chrono::NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn buckets_all_boundaries() {
        assert_eq!(bucket_for(&local(4, 59)), TimeOfDay::Night);
        assert_eq!(bucket_for(&local(5, 0)), TimeOfDay::Morning);
        assert_eq!(bucket_for(&local(11, 59)), TimeOfDay::Morning);
        assert_eq!(bucket_for(&local(12, 0)), TimeOfDay::Afternoon);
        assert_eq!(bucket_for(&local(16, 59)), TimeOfDay::Afternoon);
        assert_eq!(bucket_for(&local(17, 0)), TimeOfDay::Evening);
        assert_eq!(bucket_for(&local(20, 59)), TimeOfDay::Evening);
        assert_eq!(bucket_for(&local(21, 0)), TimeOfDay::Night);
    }

    #[test]
    fn local_time_applies_positive_offset() {
        // 2024-06-15 12:00:00 UTC at UTC+2 is 14:00 local
        let local = local_civil_time(1_718_452_800, 7200).unwrap();
        assert_eq!(format_local_time(&local), "2024-06-15 14:00:00");
    }

    #[test]
    fn local_time_applies_negative_offset() {
        // 2024-06-15 12:00:00 UTC at UTC-5 is 07:00 local
        let local = local_civil_time(1_718_452_800, -18000).unwrap();
        assert_eq!(format_local_time(&local), "2024-06-15 07:00:00");
        assert_eq!(bucket_for(&local), TimeOfDay::Morning);
    }

    #[test]
    fn time_of_day_serializes_capitalized() {
        let json = serde_json::to_string(&TimeOfDay::Evening).unwrap();
        assert_eq!(json, "\"Evening\"");
    }
}

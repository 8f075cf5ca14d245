//! UTC timestamps for version snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Moment a snapshot was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// True when `self` is strictly earlier than `other`.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }
}

impl std::fmt::Display for Timestamp {
    /// Renders as `YYYY-MM-DD HH:MM UTC`, the form shown in restore prompts.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M UTC"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, day, hour, 6, 7).unwrap())
    }

    #[test]
    fn now_lies_between_surrounding_clock_reads() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(*ts.as_datetime() >= before && *ts.as_datetime() <= after);
    }

    #[test]
    fn earlier_is_before_later() {
        assert!(at(4, 5).is_before(&at(5, 5)));
        assert!(!at(5, 5).is_before(&at(4, 5)));
        assert!(!at(4, 5).is_before(&at(4, 5)));
    }

    #[test]
    fn display_is_minute_precision() {
        assert_eq!(at(4, 5).to_string(), "2024-03-04 05:06 UTC");
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let json = serde_json::to_string(&at(4, 5)).unwrap();
        assert_eq!(json, "\"2024-03-04T05:06:07Z\"");
    }
}

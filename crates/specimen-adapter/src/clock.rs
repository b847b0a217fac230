//! Wall-clock time and timestamp formatting

use chrono::{DateTime, SecondsFormat, Utc};
use specimen_domain::Timestamp;
use specimen_usecase::Clock;

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(Utc::now().timestamp_millis())
    }
}

pub fn to_datetime(ts: Timestamp) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(ts.as_millis()).unwrap_or_default()
}

pub fn from_datetime(dt: &DateTime<Utc>) -> Timestamp {
    Timestamp::from_millis(dt.timestamp_millis())
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub fn to_rfc3339(ts: Timestamp) -> String {
    to_datetime(ts).to_rfc3339_opts(SecondsFormat::Millis, true)
}

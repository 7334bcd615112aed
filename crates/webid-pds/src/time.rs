//! Time utilities for the data store.
//!
//! Document timestamps are RFC 3339 UTC strings with millisecond
//! precision (`2024-01-01T00:00:00.000Z`); token times are Unix seconds.

use chrono::{DateTime, SecondsFormat, Utc};

/// Return the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    to_rfc3339(Utc::now())
}

/// Format a UTC instant the way every stored document expects it.
pub fn to_rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Return the current time as seconds since the Unix epoch.
pub fn now_unix_secs() -> i64 {
    Utc::now().timestamp()
}

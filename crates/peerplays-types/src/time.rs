//! Second-resolution UTC timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::{json_str, JsonField};
use crate::TypesError;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Seconds since the Unix epoch, written as a little-endian u32.
///
/// JSON form is `YYYY-MM-DDTHH:MM:SS` in UTC without a zone suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointInTime(pub u32);

impl PointInTime {
    pub fn from_secs(secs: u32) -> Self {
        PointInTime(secs)
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        let secs = Utc::now().timestamp().clamp(0, i64::from(u32::MAX));
        PointInTime(secs as u32)
    }

    pub fn secs(&self) -> u32 {
        self.0
    }

    /// Shift forward by `secs`, saturating at the end of the u32 range.
    pub fn plus_secs(&self, secs: u32) -> Self {
        PointInTime(self.0.saturating_add(secs))
    }
}

impl fmt::Display for PointInTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(i64::from(self.0), 0) {
            Some(dt) => write!(f, "{}", dt.format(FORMAT)),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for PointInTime {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('Z').unwrap_or(s);
        let naive = NaiveDateTime::parse_from_str(trimmed, FORMAT)
            .map_err(|e| TypesError::InvalidTimestamp(format!("{}: {}", s, e)))?;
        let secs = naive.and_utc().timestamp();
        u32::try_from(secs)
            .map(PointInTime)
            .map_err(|_| TypesError::InvalidTimestamp(format!("{} is out of range", s)))
    }
}

impl Encode for PointInTime {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.0);
    }
}

impl Decode for PointInTime {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(PointInTime(reader.read_u32_le()?))
    }
}

impl JsonField for PointInTime {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_str(value, "timestamp string")?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_timestamp() {
        let t: PointInTime = "2016-04-06T08:29:27".parse().unwrap();
        assert_eq!(t.secs(), 1_459_931_367);
        assert_eq!(t.to_hex(), "e7c80457");
        assert_eq!(t.to_string(), "2016-04-06T08:29:27");
    }

    #[test]
    fn test_trailing_z_accepted() {
        let a: PointInTime = "2016-04-06T08:29:27Z".parse().unwrap();
        let b: PointInTime = "2016-04-06T08:29:27".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_timestamps() {
        assert!("2016-04-06".parse::<PointInTime>().is_err());
        assert!("1960-01-01T00:00:00".parse::<PointInTime>().is_err());
        assert!("yesterday".parse::<PointInTime>().is_err());
    }

    #[test]
    fn test_epoch_and_plus() {
        assert_eq!(PointInTime(0).to_string(), "1970-01-01T00:00:00");
        assert_eq!(PointInTime(10).plus_secs(20), PointInTime(30));
        assert_eq!(PointInTime(u32::MAX).plus_secs(1), PointInTime(u32::MAX));
    }
}

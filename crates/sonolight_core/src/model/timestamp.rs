//! Serde adapters for stored timestamps.
//!
//! Writes RFC 3339 in UTC. Reads RFC 3339, naive ISO date-times (taken as
//! UTC, the layout of older data files) and bare dates (midnight UTC).

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(value.with_timezone(&Utc));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(value.and_utc());
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(value.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }
    Err(format!("invalid timestamp `{raw}`"))
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub mod utc {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod utc_opt {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_str(&format_timestamp(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{TimeZone, Utc};

    #[test]
    fn parses_rfc3339_naive_and_date_only_values() {
        let expected = Utc.with_ymd_and_hms(2025, 6, 21, 18, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-21T18:30:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-06-21T20:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-06-21T18:30:00.000000").unwrap(), expected);

        let midnight = Utc.with_ymd_and_hms(2025, 6, 21, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2025-06-21").unwrap(), midnight);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("next friday").is_err());
    }

    #[test]
    fn formats_as_utc_rfc3339() {
        let value = Utc.with_ymd_and_hms(2025, 6, 21, 18, 30, 0).unwrap();
        assert_eq!(format_timestamp(&value), "2025-06-21T18:30:00Z");
    }
}

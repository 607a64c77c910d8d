use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const SENTINEL_YEAR: i32 = 2000;

/// Fallback publication date used when a record has no usable timestamp.
pub fn sentinel_date() -> DateTime<FixedOffset> {
    let midnight = NaiveDate::from_ymd_opt(SENTINEL_YEAR, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    Utc.from_utc_datetime(&midnight).fixed_offset()
}

/// Publication timestamp as it came out of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTimestamp {
    /// A timestamp the store already typed for us.
    Structured(DateTime<FixedOffset>),
    /// Anything else; parsed by the normalizer.
    Text(String),
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        RawTimestamp::Text(value.to_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for RawTimestamp {
    fn from(value: DateTime<Tz>) -> Self {
        RawTimestamp::Structured(value.fixed_offset())
    }
}

/// A source document with every field optional. Fields the dashboard does
/// not use are dropped when the record is decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published_at: Option<RawTimestamp>,
}

impl RawRecord {
    pub fn new(title: &str, content: &str, published_at: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            published_at: Some(RawTimestamp::from(published_at)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub published_at: DateTime<FixedOffset>,
    pub year: i32,
    pub word_count: usize,
    pub clean_content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_sentinel_date() {
        let date = sentinel_date();
        assert_eq!(date.year(), 2000);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
        assert_eq!(date.to_rfc3339(), "2000-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_structured_timestamp_keeps_offset() {
        let ts = DateTime::parse_from_rfc3339("2021-12-31T23:30:00-05:00").unwrap();
        match RawTimestamp::from(ts) {
            RawTimestamp::Structured(dt) => assert_eq!(dt.year(), 2021),
            other => panic!("unexpected timestamp: {:?}", other),
        }
    }
}

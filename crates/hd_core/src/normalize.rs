use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

use crate::clean::{word_count, TextCleaner};
use crate::types::{sentinel_date, Article, RawRecord, RawTimestamp};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// Month-first wins for ambiguous slashes; day-first only parses once the
// first field cannot be a month.
const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%d %b %Y",
];

/// Partial dates, completed to the first day of the period before parsing.
const PARTIAL_DATE_FORMATS: &[(&str, &str, usize)] = &[
    // (format, completion, input length)
    ("%Y-%m-%d", "-01", 7),
    ("%Y/%m/%d", "/01", 7),
    ("%Y-%m-%d", "-01-01", 4),
];

/// Outcome of resolving a raw publication timestamp.
#[derive(Debug, Clone, PartialEq)]
pub enum DateParse {
    Parsed(DateTime<FixedOffset>),
    /// Absent or blank; falls back silently.
    Missing,
    /// Present but unreadable; falls back with a warning.
    Failed { raw: String, reason: String },
}

impl DateParse {
    pub fn resolve(&self) -> DateTime<FixedOffset> {
        match self {
            DateParse::Parsed(dt) => *dt,
            DateParse::Missing | DateParse::Failed { .. } => sentinel_date(),
        }
    }
}

pub fn parse_published_at(raw: Option<&RawTimestamp>) -> DateParse {
    match raw {
        None => DateParse::Missing,
        Some(RawTimestamp::Structured(dt)) => DateParse::Parsed(*dt),
        Some(RawTimestamp::Text(text)) => parse_text(text),
    }
}

fn parse_text(text: &str) -> DateParse {
    let text = text.trim();
    if text.is_empty() {
        return DateParse::Missing;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return DateParse::Parsed(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return DateParse::Parsed(dt);
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return DateParse::Parsed(dt);
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return DateParse::Parsed(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            let naive = date.and_time(chrono::NaiveTime::MIN);
            return DateParse::Parsed(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }
    for (format, completion, len) in PARTIAL_DATE_FORMATS {
        if text.len() != *len {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}{}", text, completion), format) {
            let naive = date.and_time(chrono::NaiveTime::MIN);
            return DateParse::Parsed(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }

    DateParse::Failed {
        raw: text.to_string(),
        reason: "unrecognised date format".to_string(),
    }
}

/// Raised when a record's date could not be read and the sentinel was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateWarning {
    pub title: String,
    pub raw: String,
    pub reason: String,
}

impl fmt::Display for DateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() { "<untitled>" } else { &self.title };
        write!(
            f,
            "could not parse published_at {:?} for {:?}: {}",
            self.raw, title, self.reason
        )
    }
}

#[derive(Debug, Clone)]
pub struct Normalized {
    pub article: Article,
    pub warning: Option<DateWarning>,
}

pub fn normalize(record: RawRecord, cleaner: &TextCleaner) -> Normalized {
    let parsed = parse_published_at(record.published_at.as_ref());
    let published_at = parsed.resolve();

    let title = record.title.unwrap_or_default();
    let content = record.content.unwrap_or_default();

    let warning = match parsed {
        DateParse::Failed { raw, reason } => Some(DateWarning {
            title: title.clone(),
            raw,
            reason,
        }),
        _ => None,
    };

    let article = Article {
        year: published_at.year(),
        word_count: word_count(&content),
        clean_content: cleaner.clean(&content),
        published_at,
        title,
        content,
    };

    Normalized { article, warning }
}

/// Normalizes a whole fetch. Date failures are logged and collected, never
/// returned as errors.
pub fn normalize_all(records: Vec<RawRecord>, cleaner: &TextCleaner) -> (Vec<Article>, Vec<DateWarning>) {
    let mut articles = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for record in records {
        let Normalized { article, warning } = normalize(record, cleaner);
        if let Some(warning) = warning {
            warn!("⚠️ {}", warning);
            warnings.push(warning);
        }
        debug!("📄 {} ({}, {} words)", article.title, article.year, article.word_count);
        articles.push(article);
    }

    (articles, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawTimestamp {
        RawTimestamp::Text(s.to_string())
    }

    fn year_of(s: &str) -> i32 {
        parse_published_at(Some(&text(s))).resolve().year()
    }

    #[test]
    fn test_parse_accepted_formats() {
        assert_eq!(year_of("2021-03-04T10:00:00Z"), 2021);
        assert_eq!(year_of("2019-07-01T08:15:00+07:00"), 2019);
        assert_eq!(year_of("Tue, 1 Jul 2003 10:52:37 +0200"), 2003);
        assert_eq!(year_of("2018-05-06 12:00:00"), 2018);
        assert_eq!(year_of("2018-05-06 12:00:00.250"), 2018);
        assert_eq!(year_of("2017-01-02T03:04:05"), 2017);
        assert_eq!(year_of("2016-11-30"), 2016);
        assert_eq!(year_of("2015/11/30"), 2015);
        assert_eq!(year_of("12/31/2014"), 2014);
    }

    fn date_of(s: &str) -> String {
        match parse_published_at(Some(&text(s))) {
            DateParse::Parsed(dt) => dt.format("%Y-%m-%d").to_string(),
            other => panic!("{:?} did not parse: {:?}", s, other),
        }
    }

    #[test]
    fn test_parse_year_only() {
        assert_eq!(date_of("2021"), "2021-01-01");
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(date_of("2021-03"), "2021-03-01");
        assert_eq!(date_of("2021/03"), "2021-03-01");
    }

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(date_of("20210305"), "2021-03-05");
    }

    #[test]
    fn test_parse_named_months() {
        assert_eq!(date_of("March 5, 2021"), "2021-03-05");
        assert_eq!(date_of("5 March 2021"), "2021-03-05");
        assert_eq!(date_of("Mar 5, 2021"), "2021-03-05");
        assert_eq!(date_of("5 Mar 2021"), "2021-03-05");
    }

    #[test]
    fn test_parse_day_first_only_when_unambiguous() {
        assert_eq!(date_of("31/12/2021"), "2021-12-31");
        assert_eq!(date_of("03/05/2021"), "2021-03-05");
    }

    #[test]
    fn test_partial_forms_reject_garbage() {
        assert!(matches!(parse_published_at(Some(&text("20x1"))), DateParse::Failed { .. }));
        assert!(matches!(parse_published_at(Some(&text("2021-13"))), DateParse::Failed { .. }));
    }

    #[test]
    fn test_year_follows_source_offset() {
        // UTC would already be 2022 here
        assert_eq!(year_of("2021-12-31T22:00:00-05:00"), 2021);
    }

    #[test]
    fn test_missing_and_blank_fall_back_silently() {
        assert_eq!(parse_published_at(None), DateParse::Missing);
        assert_eq!(parse_published_at(Some(&text(""))), DateParse::Missing);
        assert_eq!(parse_published_at(Some(&text("   "))), DateParse::Missing);
        assert_eq!(DateParse::Missing.resolve(), sentinel_date());
    }

    #[test]
    fn test_malformed_date_fails_with_fallback() {
        let parsed = parse_published_at(Some(&text("kemarin sore")));
        assert!(matches!(parsed, DateParse::Failed { ref raw, .. } if raw == "kemarin sore"));
        assert_eq!(parsed.resolve().year(), 2000);
    }

    #[test]
    fn test_structured_timestamp_is_used_as_is() {
        let dt = DateTime::parse_from_rfc3339("2020-02-29T00:00:00+00:00").unwrap();
        assert_eq!(parse_published_at(Some(&RawTimestamp::Structured(dt))), DateParse::Parsed(dt));
    }

    #[test]
    fn test_normalize_fills_derived_fields() {
        let record = RawRecord::new("Kifosis", "Kifosis pada remaja, 12 kasus.", "2022-08-17");
        let normalized = normalize(record, &TextCleaner::default());
        assert!(normalized.warning.is_none());
        assert_eq!(normalized.article.year, 2022);
        assert_eq!(normalized.article.word_count, 5);
        assert_eq!(normalized.article.clean_content, "kifosis remaja kasus");
    }

    #[test]
    fn test_normalize_malformed_date_and_missing_content() {
        let record = RawRecord {
            title: Some("Tanpa tanggal".to_string()),
            content: None,
            published_at: Some(text("31-31-31")),
        };
        let normalized = normalize(record, &TextCleaner::default());
        assert_eq!(normalized.article.year, 2000);
        assert_eq!(normalized.article.word_count, 0);
        assert_eq!(normalized.article.content, "");
        assert_eq!(normalized.article.clean_content, "");

        let warning = normalized.warning.expect("expected a date warning");
        assert_eq!(warning.title, "Tanpa tanggal");
        assert_eq!(warning.raw, "31-31-31");
    }

    #[test]
    fn test_normalize_all_collects_warnings() {
        let records = vec![
            RawRecord::new("a", "satu", "2020-01-01"),
            RawRecord::new("b", "dua", "bukan tanggal"),
            RawRecord::default(),
        ];
        let (articles, warnings) = normalize_all(records, &TextCleaner::default());
        assert_eq!(articles.len(), 3);
        assert_eq!(warnings.len(), 1);
        assert_eq!(articles.iter().map(|a| a.year).collect::<Vec<_>>(), vec![2020, 2000, 2000]);
    }
}

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct Music {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub category_id: String,
    /// Raw identifier; not checked against the category's types
    pub category_type_id: String,
    /// Stored as `/uploads/<file name>`
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    /// Seconds, at least 1
    pub duration: f64,
    pub release_date: DateTime<Utc>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn parse_duration(raw: &str) -> DomainResult<f64> {
    let duration: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::Validation(format!("Invalid duration '{}'", raw)))?;

    if !duration.is_finite() || duration < 1.0 {
        return Err(DomainError::Validation(
            "Duration must be at least 1 second".into(),
        ));
    }
    Ok(duration)
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_release_date(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| DomainError::Validation(format!("Invalid release date '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;

    #[test]
    fn duration_must_be_at_least_one_second() {
        assert_eq!(parse_duration("1").unwrap(), 1.0);
        assert_eq!(parse_duration(" 245.5 ").unwrap(), 245.5);
        assert!(parse_duration("0").is_err());
        assert!(parse_duration("-3").is_err());
        assert!(parse_duration("abc").is_err());
        assert!(parse_duration("NaN").is_err());
    }

    #[test]
    fn release_date_accepts_plain_dates() {
        let date = parse_release_date("1975-10-31").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1975, 10, 31));
    }

    #[test]
    fn release_date_accepts_rfc3339() {
        let date = parse_release_date("2020-02-29T12:30:00+02:00").unwrap();
        assert_eq!(date.to_rfc3339(), "2020-02-29T10:30:00+00:00");
    }

    #[test]
    fn release_date_rejects_garbage() {
        assert!(matches!(
            parse_release_date("next tuesday"),
            Err(DomainError::Validation(_))
        ));
    }
}

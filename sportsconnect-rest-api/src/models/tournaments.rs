//! Tournament request models

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTournamentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTournamentRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub banner: Option<String>,
}

/// Accepts RFC 3339, an HTML `datetime-local` value or a bare date (midnight UTC)
pub fn parse_tournament_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_formats() {
        let rfc = parse_tournament_date("2025-04-12T09:30:00Z").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2025-04-12T09:30:00+00:00");

        let local = parse_tournament_date("2025-04-12T09:30").unwrap();
        assert_eq!(local, rfc);

        let bare = parse_tournament_date("2025-04-12").unwrap();
        assert_eq!(bare.to_rfc3339(), "2025-04-12T00:00:00+00:00");

        assert!(parse_tournament_date("next saturday").is_none());
    }
}

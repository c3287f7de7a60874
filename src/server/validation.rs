//! Parsing of loosely typed query-string values.

use chrono::NaiveDate;

use crate::server::response::ApiError;
use crate::types::non_blank;

/// Accepts `1`/`true`/`yes` and `0`/`false`/`no`, case-insensitively.
pub fn parse_flag(field: &str, value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ApiError::bad_request(format!(
            "{field} must be a boolean, got '{other}'"
        ))),
    }
}

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ApiError::bad_request(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

pub fn parse_optional_date(field: &str, value: Option<String>) -> Result<Option<NaiveDate>, ApiError> {
    non_blank(value).map(|v| parse_date(field, &v)).transpose()
}

/// Comma-separated values with blanks dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<(), ApiError> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(ApiError::bad_request(format!(
                "{field} range is empty: {min} > {max}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("is_project", "1").unwrap());
        assert!(parse_flag("is_project", "TRUE").unwrap());
        assert!(!parse_flag("is_project", "0").unwrap());
        assert!(parse_flag("is_project", "maybe").is_err());
    }

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list("改稿中, 终稿,,"), vec!["改稿中", "终稿"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("start_date", Some(" ".into())).unwrap(), None);
        assert_eq!(
            parse_optional_date("start_date", Some("2025-02-03".into())).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3)
        );
        assert!(parse_optional_date("start_date", Some("03/02/2025".into())).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("score", Some(10.0), Some(20.0)).is_ok());
        assert!(validate_range("score", Some(30.0), Some(20.0)).is_err());
        assert!(validate_range::<f64>("score", None, Some(20.0)).is_ok());
    }
}

use crate::api::DATE_FORMAT;
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};

/// Widest window the NEO feed accepts, in days between start and end.
pub const NEO_MAX_RANGE_DAYS: i64 = 7;

/// First day with an APOD entry.
pub const APOD_FIRST_DATE: (i32, u32, u32) = (1995, 6, 16);

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_| {
        AppError::InvalidParameter("Invalid date format. Please use YYYY-MM-DD.".to_string())
    })
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// A day that may have an APOD: not in the future (UTC) and not before the archive began.
pub fn is_valid_apod_date(date: NaiveDate, today: NaiveDate) -> bool {
    let (y, m, d) = APOD_FIRST_DATE;
    let first = NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
    date >= first && date <= today
}

/// Parses and checks an ordered start/end pair, optionally bounding its width.
pub fn parse_date_range(
    start: &str,
    end: &str,
    max_days: Option<i64>,
) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    if end < start {
        return Err(AppError::InvalidParameter(
            "End date must not be before start date".to_string(),
        ));
    }
    if let Some(max) = max_days {
        if (end - start).num_days() > max {
            return Err(AppError::InvalidParameter(format!(
                "Date range must not exceed {max} days"
            )));
        }
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[rstest]
    #[case("2023-01-01", true)]
    #[case(" 2023-01-01 ", true)]
    #[case("invalid-date", false)]
    #[case("2023-13-01", false)]
    #[case("2023-02-30", false)]
    #[case("01/02/2023", false)]
    #[case("", false)]
    fn strict_date_parsing(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(parse_date(raw).is_ok(), ok);
    }

    #[test]
    fn parse_error_message_names_the_format() {
        let err = parse_date("nope").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[rstest]
    #[case("2024-05-01", true)]
    #[case("2024-05-02", false)]
    #[case("1995-06-16", true)]
    #[case("1995-06-15", false)]
    fn apod_date_window(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(is_valid_apod_date(d(raw), d("2024-05-01")), ok);
    }

    #[test]
    fn range_must_be_ordered() {
        assert!(parse_date_range("2024-01-05", "2024-01-01", None).is_err());
        assert!(parse_date_range("2024-01-01", "2024-01-01", None).is_ok());
    }

    #[test]
    fn range_width_is_bounded() {
        assert!(parse_date_range("2024-01-01", "2024-01-08", Some(NEO_MAX_RANGE_DAYS)).is_ok());
        let err = parse_date_range("2024-01-01", "2024-01-09", Some(NEO_MAX_RANGE_DAYS)).unwrap_err();
        assert!(err.to_string().contains("7 days"));
    }
}

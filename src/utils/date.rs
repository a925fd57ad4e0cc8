use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Inclusive date bounds for a period expression:
/// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, or `A:B` where A and B are periods.
pub fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some((a, b)) = p.split_once(':') {
        let (start, _) = single_period_bounds(a)?;
        let (_, end) = single_period_bounds(b)?;
        if end < start {
            return Err(AppError::InvalidPeriod(p.to_string()));
        }
        return Ok((start, end));
    }
    single_period_bounds(p)
}

fn single_period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    // YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(p, "%Y-%m-%d") {
        return Ok((d, d));
    }

    // YYYY-MM
    if p.len() == 7
        && let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d")
    {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(AppError::InvalidPeriod(p.to_string()))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_y, next_m) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_y, next_m, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).expect("valid fallback date"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_day() {
        let (a, b) = period_bounds("2025-09-15").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, NaiveDate::from_ymd_opt(2025, 9, 15).unwrap());
    }

    #[test]
    fn period_month() {
        let (a, b) = period_bounds("2024-02").unwrap();
        assert_eq!(a, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(b, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn period_year_and_range() {
        let (a, b) = period_bounds("2025").unwrap();
        assert_eq!(a, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(b, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());

        let (a, b) = period_bounds("2024-09:2025-09").unwrap();
        assert_eq!(a, NaiveDate::from_ymd_opt(2024, 9, 1).unwrap());
        assert_eq!(b, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap());
    }

    #[test]
    fn period_invalid() {
        assert!(period_bounds("2025-9").is_err());
        assert!(period_bounds("never").is_err());
        assert!(period_bounds("2025-09:2024-09").is_err());
    }
}

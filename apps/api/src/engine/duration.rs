//! Tenure arithmetic at calendar-month granularity.
//!
//! Elapsed months are `(endYear - startYear) * 12 + (endMonth - startMonth)`.
//! Day of month never participates, so Jan 31 -> Feb 1 is one month and so is
//! Jan 1 -> Feb 28. Aggregates are plain sums: overlapping entries are counted
//! twice.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::sorting::Dated;
use crate::engine::{EngineError, YearMonth};

/// Whole years plus a 0–11 month remainder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    pub years: u32,
    pub months: u32,
}

impl Tenure {
    pub fn from_months(total: u32) -> Self {
        Self {
            years: total / 12,
            months: total % 12,
        }
    }

    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }
}

/// Short label: `3년 2개월`, or `5개월` under a year.
impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years > 0 {
            write!(f, "{}년 {}개월", self.years, self.months)
        } else {
            write!(f, "{}개월", self.months)
        }
    }
}

/// A record with a start, an optional end, and an "ongoing" flag.
pub trait Timespan: Dated {
    fn end_date(&self) -> Option<&str>;
    fn is_ongoing(&self) -> bool;
}

/// Elapsed calendar months for one interval.
///
/// - `ongoing` replaces any end date with `now`.
/// - A missing or blank end on a closed interval counts as zero months.
/// - An end before the start clamps to zero.
pub fn elapsed_months(
    start: &str,
    end: Option<&str>,
    ongoing: bool,
    now: YearMonth,
) -> Result<u32, EngineError> {
    let start_ym: YearMonth = start.parse()?;
    let end_ym = if ongoing {
        now
    } else {
        match end.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) => e.parse()?,
            None => start_ym,
        }
    };

    let months = start_ym.months_until(end_ym);
    if months < 0 {
        warn!(start = %start_ym, end = %end_ym, "End precedes start; counting tenure as zero");
        return Ok(0);
    }
    Ok(u32::try_from(months).unwrap_or(u32::MAX))
}

/// Tenure of one entry. `now` is the end of an ongoing entry; handlers pass
/// the clock held in `AppState`.
pub fn compute_duration_at(
    start: &str,
    end: Option<&str>,
    ongoing: bool,
    now: YearMonth,
) -> Result<Tenure, EngineError> {
    elapsed_months(start, end, ongoing, now).map(Tenure::from_months)
}

pub fn compute_total_tenure_at<T: Timespan>(
    entries: &[T],
    now: YearMonth,
) -> Result<Tenure, EngineError> {
    let mut total: u32 = 0;
    for entry in entries {
        let months = elapsed_months(entry.start_date(), entry.end_date(), entry.is_ongoing(), now)?;
        total = total.saturating_add(months);
    }
    Ok(Tenure::from_months(total))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Span {
        start: &'static str,
        end: Option<&'static str>,
        ongoing: bool,
    }

    impl Dated for Span {
        fn start_date(&self) -> &str {
            self.start
        }
    }

    impl Timespan for Span {
        fn end_date(&self) -> Option<&str> {
            self.end
        }
        fn is_ongoing(&self) -> bool {
            self.ongoing
        }
    }

    fn ym(raw: &str) -> YearMonth {
        raw.parse().unwrap()
    }

    #[test]
    fn test_same_month_is_zero() {
        let t = compute_duration_at("2021-03", Some("2021-03"), false, ym("2030-01")).unwrap();
        assert_eq!(t, Tenure { years: 0, months: 0 });
    }

    #[test]
    fn test_ongoing_uses_now() {
        let t = compute_duration_at("2021-03", None, true, ym("2024-03")).unwrap();
        assert_eq!(t, Tenure { years: 3, months: 0 });
    }

    #[test]
    fn test_ongoing_ignores_supplied_end() {
        let t = compute_duration_at("2021-03", Some("2021-04"), true, ym("2022-05")).unwrap();
        assert_eq!(t, Tenure { years: 1, months: 2 });
    }

    #[test]
    fn test_decomposition_holds_over_range() {
        let start = ym("2019-06");
        for offset in 0..40u32 {
            let end_total = 2019 * 12 + 5 + offset;
            let end = YearMonth::new((end_total / 12) as i32, end_total % 12 + 1).unwrap();
            let t = compute_duration_at("2019-06", Some(&end.to_string()), false, end).unwrap();
            assert_eq!(i64::from(t.years * 12 + t.months), start.months_until(end));
            assert!(t.months <= 11);
        }
    }

    #[test]
    fn test_day_of_month_ignored() {
        let t = compute_duration_at("2023-01-31", Some("2023-02-01"), false, ym("2030-01")).unwrap();
        assert_eq!(t.total_months(), 1);
    }

    #[test]
    fn test_end_before_start_clamps_to_zero() {
        let t = compute_duration_at("2022-05", Some("2021-01"), false, ym("2030-01")).unwrap();
        assert_eq!(t, Tenure::default());
    }

    #[test]
    fn test_missing_end_on_closed_entry_is_zero() {
        let t = compute_duration_at("2022-05", None, false, ym("2030-01")).unwrap();
        assert_eq!(t, Tenure::default());
        let blank = compute_duration_at("2022-05", Some("  "), false, ym("2030-01")).unwrap();
        assert_eq!(blank, Tenure::default());
    }

    #[test]
    fn test_invalid_start_is_error() {
        let err = compute_duration_at("March 2021", Some("2021-04"), false, ym("2030-01")).unwrap_err();
        assert_eq!(err, EngineError::InvalidDateFormat("March 2021".to_string()));
    }

    #[test]
    fn test_invalid_end_is_error_unless_ongoing() {
        assert!(compute_duration_at("2021-01", Some("soon"), false, ym("2030-01")).is_err());
        assert!(compute_duration_at("2021-01", Some("soon"), true, ym("2030-01")).is_ok());
    }

    #[test]
    fn test_total_tenure_sums_entries() {
        // 14 months + 10 months = 24 months
        let entries = [
            Span { start: "2018-01", end: Some("2019-03"), ongoing: false },
            Span { start: "2019-05", end: Some("2020-03"), ongoing: false },
        ];
        let t = compute_total_tenure_at(&entries, ym("2030-01")).unwrap();
        assert_eq!(t, Tenure { years: 2, months: 0 });
    }

    #[test]
    fn test_total_tenure_double_counts_overlap() {
        let entries = [
            Span { start: "2020-01", end: Some("2021-01"), ongoing: false },
            Span { start: "2020-07", end: None, ongoing: true },
        ];
        let t = compute_total_tenure_at(&entries, ym("2021-07")).unwrap();
        assert_eq!(t.total_months(), 12 + 12);
    }

    #[test]
    fn test_total_tenure_empty_is_zero() {
        let entries: [Span; 0] = [];
        assert_eq!(compute_total_tenure_at(&entries, ym("2024-01")).unwrap(), Tenure::default());
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Tenure::from_months(38).to_string(), "3년 2개월");
        assert_eq!(Tenure::from_months(5).to_string(), "5개월");
    }
}

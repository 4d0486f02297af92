//! Pay-cycle calculator.
//!
//! A cycle runs from one pay day (midnight, local wall-clock time) to the
//! same day of the following month. When the pay day does not exist in a
//! month (31 in April, 30 in February) it is clamped to that month's last
//! day, so consecutive cycles always tile without gaps.
//!
//! `earned` uses the true length of the cycle. The per-unit rates use a flat
//! 30-day month and therefore disagree slightly with `earned` in 28, 29 and
//! 31 day cycles; the two are kept separate on purpose and must not be
//! reconciled here.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::PayDay;
use crate::error::{AccrualError, Result};

/// Days per month assumed by the per-unit rate breakdown.
pub const RATE_DAYS_PER_MONTH: f64 = 30.0;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Flat breakdown of a monthly amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rates {
    pub per_day: f64,
    pub per_hour: f64,
    pub per_minute: f64,
    pub per_second: f64,
}

impl Rates {
    pub fn from_monthly(monthly_amount: f64) -> Self {
        let per_day = monthly_amount / RATE_DAYS_PER_MONTH;
        let per_hour = per_day / 24.0;
        let per_minute = per_hour / 60.0;
        let per_second = per_minute / 60.0;
        Self {
            per_day,
            per_hour,
            per_minute,
            per_second,
        }
    }
}

/// Earnings for the cycle containing a given instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarningsSnapshot {
    pub cycle_start: NaiveDateTime,
    pub cycle_end: NaiveDateTime,
    /// Always within `[0, 1]`
    pub elapsed_fraction: f64,
    pub earned: f64,
    pub rates: Rates,
    /// Whole days until `cycle_end`, rounded up
    pub days_left: i64,
}

impl EarningsSnapshot {
    /// Elapsed fraction as a rounded percentage for the progress bar.
    pub fn percent(&self) -> u32 {
        (self.elapsed_fraction * 100.0).round() as u32
    }
}

/// Computes the earnings snapshot for `now`.
///
/// # Arguments
/// * `monthly_amount` - Salary per month, expected to be positive
/// * `pay_day` - Anchor day of month for cycle boundaries
/// * `now` - Local wall-clock time to evaluate at
///
/// # Errors
/// `DateOutOfRange` when a cycle boundary cannot be represented.
pub fn compute_earnings(
    monthly_amount: f64,
    pay_day: PayDay,
    now: NaiveDateTime,
) -> Result<EarningsSnapshot> {
    let (cycle_start, cycle_end) = cycle_bounds(pay_day, now)?;

    let total_ms = (cycle_end - cycle_start).num_milliseconds();
    let elapsed_ms = (now - cycle_start).num_milliseconds();
    let elapsed_fraction = if total_ms > 0 {
        (elapsed_ms as f64 / total_ms as f64).clamp(0.0, 1.0)
    } else {
        1.0
    };

    let remaining_ms = (cycle_end - now).num_milliseconds().max(0);
    let days_left = (remaining_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

    Ok(EarningsSnapshot {
        cycle_start,
        cycle_end,
        elapsed_fraction,
        earned: monthly_amount * elapsed_fraction,
        rates: Rates::from_monthly(monthly_amount),
        days_left,
    })
}

/// Start and end of the pay cycle containing `now`.
///
/// The start is this month's anchor, or last month's when this month's pay
/// day is still ahead. The end is the anchor of the month after the start.
pub fn cycle_bounds(pay_day: PayDay, now: NaiveDateTime) -> Result<(NaiveDateTime, NaiveDateTime)> {
    let candidate = anchor(now.year(), now.month(), pay_day)?;

    let (start_year, start_month) = if candidate > now {
        shift_month(now.year(), now.month(), -1)
    } else {
        (now.year(), now.month())
    };
    let cycle_start = anchor(start_year, start_month, pay_day)?;

    let (end_year, end_month) = shift_month(start_year, start_month, 1);
    let cycle_end = anchor(end_year, end_month, pay_day)?;

    Ok((cycle_start, cycle_end))
}

/// Number of days in `month` of `year`, or `None` outside chrono's range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

// Midnight on the pay day of the given month, clamped to its last day.
fn anchor(year: i32, month: u32, pay_day: PayDay) -> Result<NaiveDateTime> {
    let out_of_range = || AccrualError::DateOutOfRange { year, month };

    let last_day = days_in_month(year, month).ok_or_else(out_of_range)?;
    NaiveDate::from_ymd_opt(year, month, pay_day.get().min(last_day))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(out_of_range)
}

fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_pay_day_already_passed_this_month() {
        let (start, end) = cycle_bounds(PayDay::new(15), at(2024, 5, 20, 10, 0, 0)).unwrap();
        assert_eq!(start, at(2024, 5, 15, 0, 0, 0));
        assert_eq!(end, at(2024, 6, 15, 0, 0, 0));
    }

    #[test]
    fn test_pay_day_still_ahead_shifts_back() {
        let (start, end) = cycle_bounds(PayDay::new(15), at(2024, 5, 10, 10, 0, 0)).unwrap();
        assert_eq!(start, at(2024, 4, 15, 0, 0, 0));
        assert_eq!(end, at(2024, 5, 15, 0, 0, 0));
    }

    #[test]
    fn test_year_boundary() {
        let (start, end) = cycle_bounds(PayDay::new(15), at(2024, 1, 10, 0, 0, 0)).unwrap();
        assert_eq!(start, at(2023, 12, 15, 0, 0, 0));
        assert_eq!(end, at(2024, 1, 15, 0, 0, 0));

        let (start, end) = cycle_bounds(PayDay::new(20), at(2023, 12, 25, 0, 0, 0)).unwrap();
        assert_eq!(start, at(2023, 12, 20, 0, 0, 0));
        assert_eq!(end, at(2024, 1, 20, 0, 0, 0));
    }

    #[test]
    fn test_pay_day_31_clamps_in_short_months() {
        let day = PayDay::new(31);

        let (start, end) = cycle_bounds(day, at(2024, 4, 15, 0, 0, 0)).unwrap();
        assert_eq!(start, at(2024, 3, 31, 0, 0, 0));
        assert_eq!(end, at(2024, 4, 30, 0, 0, 0));

        let (start, end) = cycle_bounds(day, at(2024, 4, 30, 0, 0, 0)).unwrap();
        assert_eq!(start, at(2024, 4, 30, 0, 0, 0));
        assert_eq!(end, at(2024, 5, 31, 0, 0, 0));
    }

    #[test]
    fn test_february_leap_and_common_years() {
        let day = PayDay::new(31);

        let (start, end) = cycle_bounds(day, at(2024, 2, 10, 0, 0, 0)).unwrap();
        assert_eq!(start, at(2024, 1, 31, 0, 0, 0));
        assert_eq!(end, at(2024, 2, 29, 0, 0, 0));

        let (start, end) = cycle_bounds(day, at(2023, 2, 28, 8, 0, 0)).unwrap();
        assert_eq!(start, at(2023, 2, 28, 0, 0, 0));
        assert_eq!(end, at(2023, 3, 31, 0, 0, 0));
    }

    #[test]
    fn test_thirty_thousand_at_cycle_start() {
        let now = at(2024, 5, 15, 0, 0, 0);
        let snapshot = compute_earnings(30000.0, PayDay::new(15), now).unwrap();

        assert_eq!(snapshot.cycle_start, now);
        assert_eq!(snapshot.earned, 0.0);
        assert_eq!(snapshot.elapsed_fraction, 0.0);
        assert!(approx(snapshot.rates.per_day, 1000.0, 1e-9));
        assert!(approx(snapshot.rates.per_hour, 41.67, 0.005));
        assert!(approx(snapshot.rates.per_second, 0.01157, 0.000005));
        assert_eq!(snapshot.days_left, 31);
        assert_eq!(snapshot.percent(), 0);
    }

    #[test]
    fn test_halfway_through_thirty_day_cycle() {
        // June 1 to July 1 is 30 days, so the 16th at midnight is exactly half
        let snapshot =
            compute_earnings(3000.0, PayDay::new(1), at(2024, 6, 16, 0, 0, 0)).unwrap();
        assert!(approx(snapshot.elapsed_fraction, 0.5, 1e-12));
        assert!(approx(snapshot.earned, 1500.0, 1e-9));
        assert_eq!(snapshot.percent(), 50);
        assert_eq!(snapshot.days_left, 15);
    }

    #[test]
    fn test_days_left_rounds_up() {
        let snapshot =
            compute_earnings(3000.0, PayDay::new(1), at(2024, 6, 30, 23, 59, 59)).unwrap();
        assert_eq!(snapshot.days_left, 1);
    }

    #[test]
    fn test_rates_ignore_true_cycle_length() {
        // 31-day cycle, rates still assume 30
        let snapshot =
            compute_earnings(31000.0, PayDay::new(1), at(2024, 7, 2, 0, 0, 0)).unwrap();
        assert!(approx(snapshot.rates.per_day, 31000.0 / 30.0, 1e-9));
        assert!(approx(snapshot.earned, 1000.0, 1e-6));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 4), Some(30));
    }
}

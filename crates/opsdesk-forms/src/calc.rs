// File: src/calc.rs
// Purpose: Numeric helpers behind the time-entry, retainer and report forms

use crate::patterns::NamedPattern;
use crate::value::{Record, Value};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;
use thiserror::Error;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("retainer period ends ({end}) before it starts ({start})")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

fn parse_time(value: &str) -> Result<NaiveTime, CalcError> {
    if !NamedPattern::Time.is_match(value) {
        return Err(CalcError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| CalcError::InvalidTime(value.to_string()))
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Hours between two `HH:MM` times. An end before the start runs past midnight.
pub fn entry_duration_hours(start: &str, end: &str) -> Result<f64, CalcError> {
    let start = minutes_of_day(parse_time(start)?);
    let end = minutes_of_day(parse_time(end)?);

    let minutes = (end - start).rem_euclid(MINUTES_PER_DAY);
    Ok(minutes as f64 / 60.0)
}

/// Hours consumed against a retainer over one billing period
#[derive(Debug, Clone, PartialEq)]
pub struct RetainerUsage {
    pub allotted_hours: f64,
    pub used_hours: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurnProjection {
    pub period_days: i64,
    pub elapsed_days: i64,
    pub daily_burn: f64,
    pub projected_hours: f64,
    /// Projected hours as a percentage of the allotment
    pub projected_utilization: f64,
    pub remaining_hours: f64,
    pub over_budget: bool,
}

impl RetainerUsage {
    /// Extrapolate the burn rate so far to the end of the period.
    ///
    /// Both period bounds are inclusive. `as_of` is clamped into the period.
    pub fn project(&self, as_of: NaiveDate) -> Result<BurnProjection, CalcError> {
        if self.period_end < self.period_start {
            return Err(CalcError::InvalidPeriod {
                start: self.period_start,
                end: self.period_end,
            });
        }

        let period_days = (self.period_end - self.period_start).num_days() + 1;
        let elapsed_days = ((as_of - self.period_start).num_days() + 1).clamp(1, period_days);

        let daily_burn = self.used_hours / elapsed_days as f64;
        let projected_hours = daily_burn * period_days as f64;
        let projected_utilization = if self.allotted_hours > 0.0 {
            projected_hours / self.allotted_hours * 100.0
        } else {
            0.0
        };

        Ok(BurnProjection {
            period_days,
            elapsed_days,
            daily_burn,
            projected_hours,
            projected_utilization,
            remaining_hours: self.allotted_hours - self.used_hours,
            over_budget: projected_hours > self.allotted_hours,
        })
    }
}

/// Report field aggregations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Average,
    Count,
    Min,
    Max,
}

/// Aggregate numbers. Empty input gives `Some(0.0)` for sum and count, `None` otherwise.
pub fn aggregate(values: &[f64], aggregation: Aggregation) -> Option<f64> {
    match aggregation {
        Aggregation::Sum => Some(values.iter().sum()),
        Aggregation::Count => Some(values.len() as f64),
        Aggregation::Average if values.is_empty() => None,
        Aggregation::Average => Some(values.iter().sum::<f64>() / values.len() as f64),
        Aggregation::Min => values.iter().copied().reduce(f64::min),
        Aggregation::Max => values.iter().copied().reduce(f64::max),
    }
}

/// Aggregate one field across records, skipping values that are not numeric
pub fn aggregate_field(records: &[Record], field: &str, aggregation: Aggregation) -> Option<f64> {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|record| record.get(field).and_then(Value::as_number))
        .collect();

    aggregate(&values, aggregation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[rstest]
    #[case("09:00", "17:30", 8.5)]
    #[case("09:15", "09:15", 0.0)]
    #[case("22:00", "02:00", 4.0)]
    #[case("00:00", "23:45", 23.75)]
    fn test_entry_duration(#[case] start: &str, #[case] end: &str, #[case] hours: f64) {
        assert_eq!(entry_duration_hours(start, end).unwrap(), hours);
    }

    #[test]
    fn test_entry_duration_rejects_bad_time() {
        assert_eq!(
            entry_duration_hours("9:00", "17:00"),
            Err(CalcError::InvalidTime("9:00".to_string()))
        );
        assert!(entry_duration_hours("09:00", "24:00").is_err());
    }

    #[test]
    fn test_retainer_projection() {
        let usage = RetainerUsage {
            allotted_hours: 40.0,
            used_hours: 25.0,
            period_start: date("2026-10-01"),
            period_end: date("2026-10-30"),
        };
        let projection = usage.project(date("2026-10-15")).unwrap();

        assert_eq!(projection.period_days, 30);
        assert_eq!(projection.elapsed_days, 15);
        assert_eq!(projection.projected_hours, 50.0);
        assert_eq!(projection.projected_utilization, 125.0);
        assert_eq!(projection.remaining_hours, 15.0);
        assert!(projection.over_budget);
    }

    #[test]
    fn test_retainer_projection_clamps_as_of() {
        let usage = RetainerUsage {
            allotted_hours: 0.0,
            used_hours: 0.0,
            period_start: date("2026-10-01"),
            period_end: date("2026-10-10"),
        };

        assert_eq!(usage.project(date("2026-09-01")).unwrap().elapsed_days, 1);
        let late = usage.project(date("2026-12-01")).unwrap();
        assert_eq!(late.elapsed_days, 10);
        assert_eq!(late.projected_utilization, 0.0);
        assert!(!late.over_budget);
    }

    #[test]
    fn test_retainer_invalid_period() {
        let usage = RetainerUsage {
            allotted_hours: 10.0,
            used_hours: 1.0,
            period_start: date("2026-10-10"),
            period_end: date("2026-10-01"),
        };
        assert!(matches!(
            usage.project(date("2026-10-05")),
            Err(CalcError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn test_aggregate() {
        let values = [4.0, 1.5, 2.5];
        assert_eq!(aggregate(&values, Aggregation::Sum), Some(8.0));
        assert_eq!(aggregate(&values, Aggregation::Count), Some(3.0));
        assert_eq!(aggregate(&values, Aggregation::Average), Some(8.0 / 3.0));
        assert_eq!(aggregate(&values, Aggregation::Min), Some(1.5));
        assert_eq!(aggregate(&values, Aggregation::Max), Some(4.0));

        assert_eq!(aggregate(&[], Aggregation::Sum), Some(0.0));
        assert_eq!(aggregate(&[], Aggregation::Count), Some(0.0));
        assert_eq!(aggregate(&[], Aggregation::Average), None);
        assert_eq!(aggregate(&[], Aggregation::Max), None);
    }

    #[test]
    fn test_aggregate_field_skips_non_numeric() {
        let records: Vec<Record> = [Value::from(2), Value::from("3.5"), Value::from("n/a"), Value::Null]
            .into_iter()
            .map(|hours| Record::from([("hours".to_string(), hours)]))
            .collect();

        assert_eq!(aggregate_field(&records, "hours", Aggregation::Sum), Some(5.5));
        assert_eq!(aggregate_field(&records, "hours", Aggregation::Count), Some(2.0));
        assert_eq!(aggregate_field(&records, "missing", Aggregation::Min), None);
    }
}

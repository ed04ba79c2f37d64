//! Statement period: a validated calendar date range

use super::error::StatementError;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// Date format used on the wire and in rendered periods: `05/Jan/2025`
pub const PERIOD_DATE_FORMAT: &str = "%d/%b/%Y";

const PERIOD_SEPARATOR: &str = " to ";

fn period_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| {
        Regex::new(r"^\d{2}/[A-Za-z]{3}/\d{4} to \d{2}/[A-Za-z]{3}/\d{4}$")
            .expect("period pattern is valid")
    })
}

/// A statement period `[start, end]`
///
/// Construct through [`StatementPeriod::new`] or [`StatementPeriod::parse`],
/// which enforce `start <= end`. Consumers that receive a period built some
/// other way call [`StatementPeriod::validate`] before relying on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl StatementPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, StatementError> {
        let period = StatementPeriod { start, end };
        period.validate()?;
        Ok(period)
    }

    /// Parse `DD/Mon/YYYY to DD/Mon/YYYY`
    pub fn parse(text: &str) -> Result<Self, StatementError> {
        let text = text.trim();
        if !period_shape().is_match(text) {
            return Err(StatementError::invalid_period(
                text,
                "expected DD/Mon/YYYY to DD/Mon/YYYY",
            ));
        }

        let (start, end) = text
            .split_once(PERIOD_SEPARATOR)
            .ok_or_else(|| StatementError::invalid_period(text, "missing ' to ' separator"))?;
        let start = NaiveDate::parse_from_str(start, PERIOD_DATE_FORMAT)
            .map_err(|_| StatementError::invalid_period(text, "start date is not a valid date"))?;
        let end = NaiveDate::parse_from_str(end, PERIOD_DATE_FORMAT)
            .map_err(|_| StatementError::invalid_period(text, "end date is not a valid date"))?;

        StatementPeriod::new(start, end)
            .map_err(|_| StatementError::invalid_period(text, "start date is later than end date"))
    }

    /// The full calendar month before the one containing `today`
    pub fn previous_month(today: NaiveDate) -> Self {
        let first_of_this_month = today.with_day(1).unwrap_or(today);
        let end = first_of_this_month.pred_opt().unwrap_or(first_of_this_month);
        let start = end.with_day(1).unwrap_or(end);
        StatementPeriod { start, end }
    }

    /// Parse the supplied period, or fall back to the previous month
    pub fn resolve(text: Option<&str>, today: NaiveDate) -> Result<Self, StatementError> {
        match text.map(str::trim).filter(|t| !t.is_empty()) {
            Some(text) => StatementPeriod::parse(text),
            None => Ok(StatementPeriod::previous_month(today)),
        }
    }

    pub fn validate(&self) -> Result<(), StatementError> {
        if self.end < self.start {
            return Err(StatementError::invalid_period(
                self.to_string(),
                "start date is later than end date",
            ));
        }
        Ok(())
    }

    /// Days between start and end, exclusive of the end date
    ///
    /// A single-day period spans zero days.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for StatementPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.start.format(PERIOD_DATE_FORMAT),
            PERIOD_SEPARATOR,
            self.end.format(PERIOD_DATE_FORMAT)
        )
    }
}

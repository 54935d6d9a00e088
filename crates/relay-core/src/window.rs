//! Calendar-day windows used to filter the board.
//!
//! Windows are inclusive on both ends and compare at day granularity: a
//! timestamp is inside when its UTC calendar date falls in `[start, end]`.

use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Utc, Weekday};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// First day of a calendar week.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }

    /// Days from the week's first day back to `day`.
    const fn offset(self, day: Weekday) -> u32 {
        match self {
            Self::Sunday => day.num_days_from_sunday(),
            Self::Monday => day.num_days_from_monday(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "sunday",
            Self::Monday => "monday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named date ranges offered by the board filter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum DateRangePreset {
    #[default]
    ThisWeek,
    LastWeek,
    ThisMonth,
    /// Explicit `from`/`to` dates supplied by the caller.
    Custom,
}

impl DateRangePreset {
    /// Resolve against `today`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for [`Self::Custom`], which has no
    /// dates of its own; build it with [`DateWindow::new`].
    pub fn resolve(self, today: NaiveDate, week_start: WeekStart) -> Result<DateWindow, CoreError> {
        match self {
            Self::ThisWeek => Ok(week_of(today, week_start)),
            Self::LastWeek => Ok(week_of(today - TimeDelta::days(7), week_start)),
            Self::ThisMonth => month_of(today),
            Self::Custom => Err(CoreError::validation(
                "dateRange",
                "a custom range needs explicit from and to dates",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThisWeek => "this_week",
            Self::LastWeek => "last_week",
            Self::ThisMonth => "this_month",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DateRangePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::validation(
                "dateRange",
                format!("start {start} is after end {end}"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Window that contains every representable date.
    #[must_use]
    pub const fn all_time() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether `ts` falls on one of the window's days.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.contains_date(ts.date_naive())
    }

    /// Number of days covered.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

fn week_of(day: NaiveDate, week_start: WeekStart) -> DateWindow {
    let start = day - TimeDelta::days(i64::from(week_start.offset(day.weekday())));
    DateWindow {
        start,
        end: start + TimeDelta::days(6),
    }
}

fn month_of(day: NaiveDate) -> Result<DateWindow, CoreError> {
    let start = day - TimeDelta::days(i64::from(day.day0()));
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| CoreError::validation("dateRange", format!("no month end after {start}")))?;
    Ok(DateWindow { start, end })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2026-10-14 is a Wednesday.
    #[rstest]
    #[case(DateRangePreset::ThisWeek, WeekStart::Sunday, date(2026, 10, 11), date(2026, 10, 17))]
    #[case(DateRangePreset::ThisWeek, WeekStart::Monday, date(2026, 10, 12), date(2026, 10, 18))]
    #[case(DateRangePreset::LastWeek, WeekStart::Sunday, date(2026, 10, 4), date(2026, 10, 10))]
    #[case(DateRangePreset::ThisMonth, WeekStart::Sunday, date(2026, 10, 1), date(2026, 10, 31))]
    fn presets_resolve(
        #[case] preset: DateRangePreset,
        #[case] week_start: WeekStart,
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
    ) {
        let window = preset.resolve(date(2026, 10, 14), week_start).unwrap();
        assert_eq!(window, DateWindow { start, end });
    }

    #[test]
    fn week_starting_today_begins_today() {
        let sunday = date(2026, 10, 11);
        let window = DateRangePreset::ThisWeek
            .resolve(sunday, WeekStart::Sunday)
            .unwrap();
        assert_eq!(window.start, sunday);
        assert_eq!(window.days(), 7);
    }

    #[test]
    fn february_in_leap_year() {
        let window = DateRangePreset::ThisMonth
            .resolve(date(2028, 2, 10), WeekStart::Sunday)
            .unwrap();
        assert_eq!(window.end, date(2028, 2, 29));
    }

    #[test]
    fn custom_needs_dates() {
        assert!(
            DateRangePreset::Custom
                .resolve(date(2026, 10, 14), WeekStart::Sunday)
                .is_err()
        );
        assert!(DateWindow::new(date(2026, 10, 2), date(2026, 10, 1)).is_err());
    }

    #[test]
    fn bounds_are_inclusive_at_day_level() {
        let window = DateWindow::new(date(2026, 10, 1), date(2026, 10, 1)).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 10, 1, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2026, 10, 2, 0, 0, 0).unwrap();
        assert!(window.contains(early));
        assert!(window.contains(late));
        assert!(!window.contains(next));
    }

    #[test]
    fn all_time_contains_everything() {
        assert!(DateWindow::all_time().contains(Utc::now()));
    }
}

//! Month grid generation for the cashbox calendar.
//!
//! The calendar view shows a rectangle of whole weeks: it starts on the first
//! day of the week containing the 1st of the month and ends on the last day of
//! the week containing the month's last day. Days borrowed from the adjacent
//! months are kept in the grid but flagged with `in_current_month = false`, so
//! the UI can dim them.
//!
//! Everything here is a pure function of the target month. Nothing touches the
//! network, and a grid holds no identity across recomputations.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
}

/// Day-of-week convention used to cut a month into week rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn first_weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// How many days `date` lies after the start of its week (0..=6)
    pub fn offset(self, date: NaiveDate) -> u64 {
        let days = match self {
            WeekStart::Monday => date.weekday().num_days_from_monday(),
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        };
        u64::from(days)
    }

    /// Column headers in grid order
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Monday => ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            WeekStart::Sunday => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        }
    }
}

/// Get the human-readable name for a month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Key used by the calendar stats endpoint (`YYYYMMDD`)
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Shift a date by whole calendar months, clamping the day to the target month's length.
///
/// Saturates at the limits of the supported date range.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`; the day of month is ignored
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    pub fn next(self) -> Self {
        Self(shift_months(self.0, 1))
    }

    pub fn previous(self) -> Self {
        Self(shift_months(self.0, -1))
    }

    /// Header text, e.g. `FEBRUARY 2024`
    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month()), self.year()).to_uppercase()
    }
}

impl Default for YearMonth {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    /// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", trimmed), "%Y-%m-%d"))
            .map(Self::from_date)
            .map_err(|_| CalendarError::InvalidMonth(s.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// One cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for padding days borrowed from the previous or next month
    pub in_current_month: bool,
}

/// Seven consecutive days, first column first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRow {
    days: [DayCell; 7],
}

impl WeekRow {
    pub fn days(&self) -> &[DayCell; 7] {
        &self.days
    }

    pub fn first(&self) -> &DayCell {
        &self.days[0]
    }

    pub fn last(&self) -> &DayCell {
        &self.days[6]
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayCell> {
        self.days.iter()
    }
}

/// Rectangular week-by-week layout of a month plus its boundary padding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    month: YearMonth,
    week_start: WeekStart,
    weeks: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn build(month: YearMonth, week_start: WeekStart) -> Self {
        let month_start = month.first_day();
        let month_end = month.last_day();

        let grid_start = month_start - Days::new(week_start.offset(month_start));
        let grid_end = month_end + Days::new(6 - week_start.offset(month_end));

        // Both ends sit on week boundaries, so the span is a whole number of weeks
        let span = grid_end.signed_duration_since(grid_start).num_days() + 1;
        let week_count = (span / 7) as u64;

        let weeks: Vec<WeekRow> = (0..week_count)
            .map(|week| {
                let week_first = grid_start + Days::new(week * 7);
                WeekRow {
                    days: std::array::from_fn(|column| {
                        let date = week_first + Days::new(column as u64);
                        DayCell {
                            date,
                            in_current_month: date >= month_start && date <= month_end,
                        }
                    }),
                }
            })
            .collect();

        log::debug!(
            "Built month grid for {}: {} weeks from {} to {}",
            month,
            weeks.len(),
            grid_start,
            grid_end
        );

        Self {
            month,
            week_start,
            weeks,
        }
    }

    pub fn for_current_month(week_start: WeekStart) -> Self {
        Self::build(YearMonth::current(), week_start)
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn weeks(&self) -> &[WeekRow] {
        &self.weeks
    }

    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(WeekRow::iter)
    }

    pub fn grid_start(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|week| week.first().date)
    }

    pub fn grid_end(&self) -> Option<NaiveDate> {
        self.weeks.last().map(|week| week.last().date)
    }
}

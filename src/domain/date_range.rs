use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use std::fmt;

/// Inclusive span of calendar days. Iterating it never consumes it, so the
/// same range can be walked any number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Every day of the month `date` falls in.
    pub fn month(date: NaiveDate) -> Self {
        let start = first_of_month(date);
        Self::new(start, sub_days(next_month(start), 1))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        let end = self.end;
        (0..=(end - start).num_days()).map(move |i| add_days(start, i))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearParseError {
    NotANumber(String),
    OutOfRange(i32),
}

impl fmt::Display for YearParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearParseError::NotANumber(text) => write!(f, "'{}' is not a year", text),
            YearParseError::OutOfRange(year) => write!(f, "year {} is out of range", year),
        }
    }
}

impl std::error::Error for YearParseError {}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

/// Same day one month later, clamped to the end of a shorter month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Saturates at the edges of the representable calendar.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

pub fn sub_days(date: NaiveDate, days: i64) -> NaiveDate {
    add_days(date, -days)
}

pub fn add_dows(days: i64, day: Weekday) -> Weekday {
    (0..days.rem_euclid(7)).fold(day, |d, _| d.succ())
}

/// Get the start of the week containing `date`, where weeks begin on
/// `first_day_of_week`.
pub fn start_of_week(date: NaiveDate, first_day_of_week: Weekday) -> NaiveDate {
    let offset = (7 + date.weekday().num_days_from_monday()
        - first_day_of_week.num_days_from_monday())
        % 7;
    sub_days(date, offset as i64)
}

/// Dates from `start` to `end`, both bounds pulled inwards to whole weeks
/// beginning on `first_day_of_week`. Bounds that already sit on week edges
/// are kept as they are.
pub fn dates_in_range(first_day_of_week: Weekday, start: NaiveDate, end: NaiveDate) -> DateRange {
    let first = start_of_week(add_days(start, 6), first_day_of_week);
    let last = sub_days(start_of_week(add_days(end, 1), first_day_of_week), 1);
    DateRange::new(first, last)
}

/// Projection used wherever two dates must compare by calendar day only.
pub fn date_tuple(date: NaiveDate) -> (i32, u32, u32) {
    (date.year(), date.month(), date.day())
}

/// Move `reference` into the year typed in `year_text`, keeping month and day.
/// Feb 29 falls back to Feb 28 in a common year.
pub fn new_year(reference: NaiveDate, year_text: &str) -> Result<NaiveDate, YearParseError> {
    let year: i32 = year_text
        .trim()
        .parse()
        .map_err(|_| YearParseError::NotANumber(year_text.to_string()))?;

    (1..=reference.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, reference.month(), day))
        .ok_or(YearParseError::OutOfRange(year))
}

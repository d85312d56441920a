use super::date_range::{DateRange, add_days, dates_in_range, first_of_month, next_month, sub_days};
use chrono::{NaiveDate, Weekday};

pub const DAYS_PER_WEEK: usize = 7;

/// The month shown by the picker plus the weeks laid out around it.
/// Built fresh on every render and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarGrid {
    /// The date the grid was built around; only its year and month matter
    /// for display.
    pub current_month: NaiveDate,
    pub weeks: Vec<Vec<NaiveDate>>,
}

impl CalendarGrid {
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flatten().copied()
    }

    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        DateRange::month(self.current_month).contains(date)
    }
}

/// The window runs from six days before the first of the month to six days
/// after the first of the next month, trimmed to whole weeks.
pub fn visible_range(focus: NaiveDate, first_day_of_week: Weekday) -> DateRange {
    let start = sub_days(first_of_month(focus), 6);
    let end = add_days(next_month(first_of_month(focus)), 6);
    dates_in_range(first_day_of_week, start, end)
}

pub fn prepare_dates(focus: NaiveDate, first_day_of_week: Weekday) -> CalendarGrid {
    let dates: Vec<NaiveDate> = visible_range(focus, first_day_of_week).days().collect();

    CalendarGrid {
        current_month: focus,
        weeks: group_dates(&dates),
    }
}

/// Chunk dates into rows of seven in sequence order.
pub fn group_dates(dates: &[NaiveDate]) -> Vec<Vec<NaiveDate>> {
    dates
        .chunks(DAYS_PER_WEEK)
        .map(|week| week.to_vec())
        .collect()
}

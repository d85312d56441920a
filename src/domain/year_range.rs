use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which years the picker offers in its year dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum YearRange {
    #[default]
    Off,
    Between { start: i32, end: i32 },
    MoreOrLess { years: i32 },
    From { year: i32 },
    To { year: i32 },
}

impl YearRange {
    pub fn off() -> Self {
        YearRange::Off
    }

    /// Out-of-order bounds are swapped rather than rejected.
    pub fn between(start: i32, end: i32) -> Self {
        if start > end {
            YearRange::Between { start: end, end: start }
        } else {
            YearRange::Between { start, end }
        }
    }

    pub fn more_or_less(years: i32) -> Self {
        YearRange::MoreOrLess { years }
    }

    pub fn from_year(year: i32) -> Self {
        YearRange::From { year }
    }

    pub fn to_year(year: i32) -> Self {
        YearRange::To { year }
    }

    pub fn normalized(self) -> Self {
        match self {
            YearRange::Between { start, end } => Self::between(start, end),
            other => other,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, YearRange::Off)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearRange::Off => write!(f, "off"),
            YearRange::Between { start, end } => write!(f, "between:{}:{}", start, end),
            YearRange::MoreOrLess { years } => write!(f, "more-or-less:{}", years),
            YearRange::From { year } => write!(f, "from:{}", year),
            YearRange::To { year } => write!(f, "to:{}", year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearRangeParseError(pub String);

impl fmt::Display for YearRangeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid year range '{}' (expected off, between:A:B, more-or-less:N, from:Y or to:Y)",
            self.0
        )
    }
}

impl std::error::Error for YearRangeParseError {}

impl FromStr for YearRange {
    type Err = YearRangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || YearRangeParseError(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        let number = |text: &str| text.trim().parse::<i32>().map_err(|_| err());

        match parts.as_slice() {
            ["off"] => Ok(YearRange::off()),
            ["between", start, end] => Ok(YearRange::between(number(*start)?, number(*end)?)),
            ["more-or-less", years] => Ok(YearRange::more_or_less(number(*years)?)),
            ["from", year] => Ok(YearRange::from_year(number(*year)?)),
            ["to", year] => Ok(YearRange::to_year(number(*year)?)),
            _ => Err(err()),
        }
    }
}

/// Dates the year list is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearContext {
    pub current_month: NaiveDate,
    pub today: NaiveDate,
}

/// Furthest a resolved year may lie from today's year.
pub const MAX_YEAR_DISTANCE: i32 = 500;

/// Selectable years in ascending order, never more than
/// [`MAX_YEAR_DISTANCE`] years away from today. A range whose low end lies
/// above its high end resolves to no years at all.
pub fn year_range(context: YearContext, policy: YearRange) -> Vec<i32> {
    let this_year = context.today.year();

    let (low, high) = match policy.normalized() {
        YearRange::Off => return Vec::new(),
        YearRange::Between { start, end } => (start, end),
        YearRange::MoreOrLess { years } => {
            (this_year.saturating_sub(years), this_year.saturating_add(years))
        }
        YearRange::From { year } => (year, this_year),
        YearRange::To { year } => (this_year, year),
    };

    let low = low.max(this_year.saturating_sub(MAX_YEAR_DISTANCE));
    let high = high.min(this_year.saturating_add(MAX_YEAR_DISTANCE));
    (low..=high).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(year: i32) -> YearContext {
        let today = NaiveDate::from_ymd_opt(year, 6, 15).unwrap();
        YearContext {
            current_month: today,
            today,
        }
    }

    #[test]
    fn test_more_or_less() {
        assert_eq!(
            year_range(context(2020), YearRange::more_or_less(3)),
            vec![2017, 2018, 2019, 2020, 2021, 2022, 2023]
        );
    }

    #[test]
    fn test_between_is_inclusive() {
        assert_eq!(
            year_range(context(2020), YearRange::between(1999, 2002)),
            vec![1999, 2000, 2001, 2002]
        );
    }

    #[test]
    fn test_between_swaps_bounds() {
        assert_eq!(YearRange::between(2005, 2001), YearRange::Between { start: 2001, end: 2005 });
        let raw = YearRange::Between { start: 2005, end: 2003 };
        assert_eq!(year_range(context(2020), raw), vec![2003, 2004, 2005]);
    }

    #[test]
    fn test_from_and_to() {
        assert_eq!(year_range(context(2020), YearRange::from_year(2018)), vec![2018, 2019, 2020]);
        assert_eq!(year_range(context(2020), YearRange::to_year(2022)), vec![2020, 2021, 2022]);
    }

    #[test]
    fn test_degenerate_from_and_to_are_empty() {
        assert!(year_range(context(2020), YearRange::from_year(2030)).is_empty());
        assert!(year_range(context(2020), YearRange::to_year(2010)).is_empty());
    }

    #[test]
    fn test_huge_policies_are_capped() {
        let years = year_range(context(2020), YearRange::between(i32::MIN, i32::MAX));
        assert_eq!(years.len(), 2 * MAX_YEAR_DISTANCE as usize + 1);
        assert_eq!(years.first(), Some(&(2020 - MAX_YEAR_DISTANCE)));
        assert_eq!(years.last(), Some(&(2020 + MAX_YEAR_DISTANCE)));

        let years = year_range(context(2020), YearRange::more_or_less(i32::MAX));
        assert_eq!(years.len(), 2 * MAX_YEAR_DISTANCE as usize + 1);

        assert!(year_range(context(2020), YearRange::from_year(i32::MIN)).len() <= 501);
        assert!(year_range(context(2020), YearRange::between(5000, 6000)).is_empty());
    }

    #[test]
    fn test_off_is_empty() {
        assert!(year_range(context(2020), YearRange::off()).is_empty());
        assert!(!YearRange::off().is_active());
        assert!(YearRange::from_year(2000).is_active());
    }

    #[test]
    fn test_output_is_strictly_ascending() {
        let policies = [
            YearRange::between(2030, 1990),
            YearRange::more_or_less(10),
            YearRange::from_year(1950),
            YearRange::to_year(2100),
        ];
        for policy in policies {
            let years = year_range(context(2024), policy);
            assert!(years.windows(2).all(|pair| pair[0] < pair[1]), "{}", policy);
        }
    }

    #[test]
    fn test_parse_from_str() {
        assert_eq!("off".parse::<YearRange>(), Ok(YearRange::Off));
        assert_eq!("between:2010:2000".parse::<YearRange>(), Ok(YearRange::between(2000, 2010)));
        assert_eq!("more-or-less:5".parse::<YearRange>(), Ok(YearRange::more_or_less(5)));
        assert_eq!("from:1990".parse::<YearRange>(), Ok(YearRange::from_year(1990)));
        assert_eq!("to:2040".parse::<YearRange>(), Ok(YearRange::to_year(2040)));
        assert!("between:2010".parse::<YearRange>().is_err());
        assert!("sometimes".parse::<YearRange>().is_err());
    }

    #[test]
    fn test_display_parses_back() {
        let policy = YearRange::between(1990, 2000);
        assert_eq!(policy.to_string().parse::<YearRange>(), Ok(policy));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&YearRange::more_or_less(2)).unwrap();
        assert_eq!(json, r#"{"kind":"more-or-less","years":2}"#);
        let parsed: YearRange = serde_json::from_str(r#"{"kind":"off"}"#).unwrap();
        assert_eq!(parsed, YearRange::Off);
    }
}

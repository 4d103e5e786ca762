//! Date, month and year parsing.
//!
//! Sources disagree on whether `01/02/2020` is the 1st of February or the
//! 2nd of January, so every parser takes the source's [`DayOrder`]. When the
//! preferred order cannot produce a valid date (e.g. `13/01/2020` read
//! month-first) the other order is tried.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use georisk_common::is_missing_token;
use georisk_model::DayOrder;

/// Calendar month, the aggregation period of the incident sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

const ISO_DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const ISO_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

const DAY_FIRST_FORMATS: [&str; 6] = [
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
];

const MONTH_FIRST_FORMATS: [&str; 6] = [
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
];

fn try_formats(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(value, fmt))
            .ok()
    })
}

/// Parses a date in any of the supported layouts.
///
/// Time components are accepted and discarded. Blank values and missing
/// tokens yield `None`.
pub fn parse_date(value: &str, order: DayOrder) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return None;
    }

    if let Some(date) = try_formats(trimmed, &ISO_DATETIME_FORMATS)
        .or_else(|| try_formats(trimmed, &ISO_DATE_FORMATS))
    {
        return Some(date);
    }

    let (preferred, fallback) = match order {
        DayOrder::DayFirst => (&DAY_FIRST_FORMATS, &MONTH_FIRST_FORMATS),
        DayOrder::MonthFirst => (&MONTH_FIRST_FORMATS, &DAY_FIRST_FORMATS),
    };
    try_formats(trimmed, preferred).or_else(|| try_formats(trimmed, fallback))
}

/// Parses a date and truncates it to its calendar month.
pub fn parse_year_month(value: &str, order: DayOrder) -> Option<YearMonth> {
    parse_date(value, order).map(YearMonth::from_date)
}

/// Parses a year given either as a plain number (`2019`, `2019.0`) or as a
/// full date.
pub fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    if is_missing_token(trimmed) {
        return None;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        if number.fract() == 0.0 && (1000.0..=9999.0).contains(&number) {
            return Some(number as i32);
        }
        return None;
    }
    parse_date(trimmed, DayOrder::DayFirst).map(|date| date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_dates_ignore_order() {
        assert_eq!(parse_date("2020-03-04", DayOrder::DayFirst), Some(ymd(2020, 3, 4)));
        assert_eq!(
            parse_date("2020-03-04T10:15:00.000", DayOrder::MonthFirst),
            Some(ymd(2020, 3, 4))
        );
        assert_eq!(
            parse_date("2020-03-04 10:15:00", DayOrder::MonthFirst),
            Some(ymd(2020, 3, 4))
        );
    }

    #[test]
    fn ambiguous_dates_follow_order() {
        assert_eq!(parse_date("01/02/2020", DayOrder::DayFirst), Some(ymd(2020, 2, 1)));
        assert_eq!(parse_date("01/02/2020", DayOrder::MonthFirst), Some(ymd(2020, 1, 2)));
    }

    #[test]
    fn impossible_order_falls_back() {
        assert_eq!(parse_date("13/01/2020", DayOrder::MonthFirst), Some(ymd(2020, 1, 13)));
        assert_eq!(parse_date("01/13/2020", DayOrder::DayFirst), Some(ymd(2020, 1, 13)));
    }

    #[test]
    fn police_timestamps() {
        assert_eq!(
            parse_date("01/31/2019 12:00:00 AM", DayOrder::MonthFirst),
            Some(ymd(2019, 1, 31))
        );
    }

    #[test]
    fn unparseable_dates() {
        assert_eq!(parse_date("", DayOrder::DayFirst), None);
        assert_eq!(parse_date("nan", DayOrder::DayFirst), None);
        assert_eq!(parse_date("ayer", DayOrder::DayFirst), None);
        assert_eq!(parse_date("2020-13-01", DayOrder::DayFirst), None);
    }

    #[test]
    fn year_month_display() {
        let ym = parse_year_month("05/11/2018", DayOrder::DayFirst).unwrap();
        assert_eq!(ym.to_string(), "2018-11");
    }

    #[test]
    fn years() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year("2019.0"), Some(2019));
        assert_eq!(parse_year("2019-06-30"), Some(2019));
        assert_eq!(parse_year("15/03/2021"), Some(2021));
        assert_eq!(parse_year("19"), None);
        assert_eq!(parse_year("n/a"), None);
        assert_eq!(parse_year(""), None);
    }
}

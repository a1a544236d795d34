//! Public holiday models and calendars.
//!
//! Expected-hours calculation only needs one question answered: "is this
//! date a public holiday in this region?". The [`HolidayCalendar`] trait is
//! that capability; the implementations here are an explicit table loaded
//! from the log document, a built-in Australian national calendar, and a
//! chain that combines several calendars.

use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Region name that matches every configured region.
pub const NATIONAL_REGION: &str = "national";

/// Region code served by [`AustralianHolidays`].
pub const AUSTRALIA_REGION: &str = "AU";

/// Answers whether a date is a public holiday in a region.
///
/// Implementations must be pure: the same `(region, date)` always gives the
/// same answer for the lifetime of a run.
pub trait HolidayCalendar {
    /// Returns true if `date` is a public holiday in `region`.
    fn is_holiday(&self, region: &str, date: NaiveDate) -> bool;
}

/// Represents a single public holiday.
///
/// # Example
///
/// ```
/// use worklog_engine::models::PublicHoliday;
/// use chrono::NaiveDate;
///
/// let holiday = PublicHoliday {
///     date: NaiveDate::from_ymd_opt(2026, 1, 26).unwrap(),
///     name: "Australia Day".to_string(),
///     region: "AU".to_string(),
/// };
/// assert!(holiday.applies_to("au"));
/// assert!(!holiday.applies_to("NZ"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the public holiday.
    pub date: NaiveDate,
    /// The name of the public holiday (e.g., "Australia Day").
    pub name: String,
    /// The region where this holiday applies (e.g., "national", "AU", "VIC").
    pub region: String,
}

impl PublicHoliday {
    /// Checks whether this holiday is observed in `region`.
    ///
    /// National holidays apply everywhere; otherwise region codes are
    /// compared case-insensitively.
    pub fn applies_to(&self, region: &str) -> bool {
        self.region.eq_ignore_ascii_case(NATIONAL_REGION) || self.region.eq_ignore_ascii_case(region)
    }
}

/// A calendar with no holidays at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _region: &str, _date: NaiveDate) -> bool {
        false
    }
}

/// An explicit list of holidays, typically from the log document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayTable {
    holidays: Vec<PublicHoliday>,
}

impl HolidayTable {
    /// Creates a table from a list of holidays.
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        Self { holidays }
    }

    /// Returns the holidays in the table.
    pub fn holidays(&self) -> &[PublicHoliday] {
        &self.holidays
    }

    /// Returns true if the table has no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl HolidayCalendar for HolidayTable {
    fn is_holiday(&self, region: &str, date: NaiveDate) -> bool {
        self.holidays
            .iter()
            .any(|h| h.date == date && h.applies_to(region))
    }
}

/// Built-in Australian national public holidays (region `AU`).
///
/// Covers New Year's Day, Australia Day, Good Friday, Easter Monday, Anzac
/// Day, the King's Birthday (second Monday of June), Christmas Day and Boxing
/// Day. Weekend New Year's Day, Australia Day, Christmas Day and Boxing Day
/// are observed on the following weekday(s). Anzac Day has no substitute.
///
/// # Example
///
/// ```
/// use worklog_engine::models::{AustralianHolidays, HolidayCalendar};
/// use chrono::NaiveDate;
///
/// let calendar = AustralianHolidays;
/// let anzac = NaiveDate::from_ymd_opt(2024, 4, 25).unwrap();
/// assert!(calendar.is_holiday("AU", anzac));
/// assert!(!calendar.is_holiday("NZ", anzac));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AustralianHolidays;

impl AustralianHolidays {
    /// Returns every observed national holiday in `year`, sorted by date.
    pub fn holidays_in_year(year: i32) -> Vec<PublicHoliday> {
        let mut days: Vec<(NaiveDate, &str)> = Vec::new();

        if let Some(new_year) = NaiveDate::from_ymd_opt(year, 1, 1) {
            days.push((new_year, "New Year's Day"));
            if let Some(sub) = next_monday_if_weekend(new_year) {
                days.push((sub, "New Year's Day (observed)"));
            }
        }

        if let Some(australia_day) = NaiveDate::from_ymd_opt(year, 1, 26) {
            days.push((australia_day, "Australia Day"));
            if let Some(sub) = next_monday_if_weekend(australia_day) {
                days.push((sub, "Australia Day (observed)"));
            }
        }

        if let Some(easter) = easter_sunday(year) {
            days.push((easter - Duration::days(2), "Good Friday"));
            days.push((easter + Duration::days(1), "Easter Monday"));
        }

        if let Some(anzac) = NaiveDate::from_ymd_opt(year, 4, 25) {
            days.push((anzac, "Anzac Day"));
        }

        if let Some(kings_birthday) = NaiveDate::from_weekday_of_month_opt(year, 6, Weekday::Mon, 2)
        {
            days.push((kings_birthday, "King's Birthday"));
        }

        if let (Some(christmas), Some(boxing_day)) = (
            NaiveDate::from_ymd_opt(year, 12, 25),
            NaiveDate::from_ymd_opt(year, 12, 26),
        ) {
            days.push((christmas, "Christmas Day"));
            days.push((boxing_day, "Boxing Day"));
            match christmas.weekday() {
                Weekday::Fri => {
                    days.push((christmas + Duration::days(3), "Boxing Day (observed)"));
                }
                Weekday::Sat => {
                    days.push((christmas + Duration::days(2), "Christmas Day (observed)"));
                    days.push((christmas + Duration::days(3), "Boxing Day (observed)"));
                }
                Weekday::Sun => {
                    days.push((christmas + Duration::days(2), "Christmas Day (observed)"));
                }
                _ => {}
            }
        }

        days.sort_by_key(|(date, _)| *date);
        days.into_iter()
            .map(|(date, name)| PublicHoliday {
                date,
                name: name.to_string(),
                region: AUSTRALIA_REGION.to_string(),
            })
            .collect()
    }
}

impl HolidayCalendar for AustralianHolidays {
    fn is_holiday(&self, region: &str, date: NaiveDate) -> bool {
        region.eq_ignore_ascii_case(AUSTRALIA_REGION)
            && Self::holidays_in_year(date.year())
                .iter()
                .any(|h| h.date == date)
    }
}

/// Several calendars consulted in order; a date is a holiday if any says so.
#[derive(Default)]
pub struct HolidayCalendars {
    calendars: Vec<Box<dyn HolidayCalendar>>,
}

impl HolidayCalendars {
    /// Creates an empty chain, which behaves like [`NoHolidays`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a calendar to the chain.
    pub fn with(mut self, calendar: impl HolidayCalendar + 'static) -> Self {
        self.calendars.push(Box::new(calendar));
        self
    }

    /// Returns true if at least one calendar has a holiday for `region`
    /// in any of `years`.
    pub fn knows_region(&self, region: &str, years: RangeInclusive<i32>) -> bool {
        years.into_iter().any(|year| {
            let Some(mut day) = NaiveDate::from_ymd_opt(year, 1, 1) else {
                return false;
            };
            while day.year() == year {
                if self.is_holiday(region, day) {
                    return true;
                }
                day += Duration::days(1);
            }
            false
        })
    }
}

impl std::fmt::Debug for HolidayCalendars {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayCalendars")
            .field("calendars", &self.calendars.len())
            .finish()
    }
}

impl HolidayCalendar for HolidayCalendars {
    fn is_holiday(&self, region: &str, date: NaiveDate) -> bool {
        self.calendars.iter().any(|c| c.is_holiday(region, date))
    }
}

fn next_monday_if_weekend(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => Some(date + Duration::days(2)),
        Weekday::Sun => Some(date + Duration::days(1)),
        _ => None,
    }
}

/// Computes Easter Sunday with the anonymous Gregorian algorithm.
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

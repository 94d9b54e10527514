//! Calendar dates, time of day and date windows
//!
//! Only what the menus need: validated construction, ordering, month
//! names and inclusive windows.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Date and window construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateError {
    InvalidMonth,
    /// Day is not in the month (e.g. 30 February)
    InvalidDay,
    InvalidTime,
    /// Window end lies before its begin
    EndBeforeBegin,
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a month (1-12)
pub fn month_name(month: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(month).wrapping_sub(1)).copied()
}

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days in a month, 0 for an invalid month
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// A valid calendar date
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidMonth);
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateError::InvalidDay);
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Same day and month in another year
    pub fn with_year(&self, year: u16) -> Result<Self, DateError> {
        Self::new(year, self.month, self.day)
    }

    pub fn with_month(&self, month: u8) -> Result<Self, DateError> {
        Self::new(self.year, month, self.day)
    }

    pub fn with_day(&self, day: u8) -> Result<Self, DateError> {
        Self::new(self.year, self.month, day)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Hours and minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    pub fn new(hour: u8, minute: u8) -> Result<Self, DateError> {
        if hour > 23 || minute > 59 {
            return Err(DateError::InvalidTime);
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// The time as a four digit clock value, e.g. 9:05 is 905
    pub fn hhmm(&self) -> i32 {
        i32::from(self.hour) * 100 + i32::from(self.minute)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Inclusive range of days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateWindow {
    begin: Date,
    end: Date,
}

impl DateWindow {
    pub fn new(begin: Date, end: Date) -> Result<Self, DateError> {
        if end < begin {
            return Err(DateError::EndBeforeBegin);
        }
        Ok(Self { begin, end })
    }

    /// Window covering a single day
    pub fn day(date: Date) -> Self {
        Self {
            begin: date,
            end: date,
        }
    }

    /// 1 January to 31 December of `year`
    pub fn year(year: u16) -> Self {
        Self {
            begin: Date {
                year,
                month: 1,
                day: 1,
            },
            end: Date {
                year,
                month: 12,
                day: 31,
            },
        }
    }

    pub fn begin(&self) -> Date {
        self.begin
    }

    pub fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.begin <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_validation() {
        assert!(Date::new(2024, 2, 29).is_ok());
        assert_eq!(Date::new(2023, 2, 29), Err(DateError::InvalidDay));
        assert_eq!(Date::new(1900, 2, 29), Err(DateError::InvalidDay));
        assert!(Date::new(2000, 2, 29).is_ok());
        assert_eq!(Date::new(2024, 13, 1), Err(DateError::InvalidMonth));
        assert_eq!(Date::new(2024, 4, 31), Err(DateError::InvalidDay));
        assert_eq!(Date::new(2024, 4, 0), Err(DateError::InvalidDay));
    }

    #[test]
    fn test_date_ordering_and_display() {
        let a = Date::new(2023, 12, 31).unwrap();
        let b = Date::new(2024, 1, 1).unwrap();
        assert!(a < b);
        assert_eq!(a.to_string(), "2023-12-31");
        assert_eq!(b.with_month(2).unwrap().with_day(29).unwrap().day(), 29);
        assert_eq!(
            Date::new(2024, 2, 29).unwrap().with_year(2023),
            Err(DateError::InvalidDay)
        );
    }

    #[test]
    fn test_time_of_day() {
        let t = TimeOfDay::new(9, 5).unwrap();
        assert_eq!(t.hhmm(), 905);
        assert_eq!(t.to_string(), "09:05");
        assert_eq!(TimeOfDay::new(24, 0), Err(DateError::InvalidTime));
    }

    #[test]
    fn test_window() {
        let a = Date::new(2024, 3, 1).unwrap();
        let b = Date::new(2024, 3, 9).unwrap();
        assert_eq!(DateWindow::new(b, a), Err(DateError::EndBeforeBegin));

        let w = DateWindow::new(a, b).unwrap();
        assert!(w.contains(a) && w.contains(b));
        assert!(!w.contains(Date::new(2024, 3, 10).unwrap()));

        let y = DateWindow::year(2021);
        assert_eq!(y.end().to_string(), "2021-12-31");
        assert_eq!(DateWindow::day(a).begin(), a);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }
}

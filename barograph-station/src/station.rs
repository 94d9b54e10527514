//! Application context shared by every menu action
//!
//! Holds the data provider, the reporting window the statistics pages
//! read from, and the window being edited under the Period menu. Edits
//! land in the pending pair first; only the Period "Back" entry turns them
//! into the active window.

use barograph_core::action::Notice;
use barograph_core::period::{Date, DateError, DateWindow};
use barograph_core::traits::{DataProvider, Reading};

const INVALID_DATE: Notice = Notice::error("Invalid date");
const END_BEFORE_BEGIN: Notice = Notice::error("End before begin");
const INVALID_YEAR: Notice = Notice::error("Invalid year");

/// Weather-station state
pub struct Station<P> {
    provider: P,
    today: Date,
    begin: Date,
    end: Date,
    window: DateWindow,
    rain_year: Option<u16>,
    latest: Option<Reading>,
}

impl<P: DataProvider> Station<P> {
    /// Start with both the active and the pending window on `today`
    pub fn new(provider: P, today: Date) -> Self {
        Self {
            provider,
            today,
            begin: today,
            end: today,
            window: DateWindow::day(today),
            rain_year: None,
            latest: None,
        }
    }

    pub fn today(&self) -> Date {
        self.today
    }

    /// Begin and end as edited so far
    pub fn pending(&self) -> (Date, Date) {
        (self.begin, self.end)
    }

    /// Window the statistics pages read from
    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn rain_year(&self) -> Option<u16> {
        self.rain_year
    }

    /// Reading cached by the last refresh
    pub fn latest(&self) -> Option<&Reading> {
        self.latest.as_ref()
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Replace the pending years
    pub fn set_years(&mut self, begin: i32, end: i32) -> Result<(), Notice> {
        let (begin, end) = (to_u16(begin)?, to_u16(end)?);
        self.update(|d| d.with_year(begin), |d| d.with_year(end))
    }

    /// Replace the pending months
    pub fn set_months(&mut self, begin: i32, end: i32) -> Result<(), Notice> {
        let (begin, end) = (to_u8(begin)?, to_u8(end)?);
        self.update(|d| d.with_month(begin), |d| d.with_month(end))
    }

    /// Replace the pending days
    pub fn set_days(&mut self, begin: i32, end: i32) -> Result<(), Notice> {
        let (begin, end) = (to_u8(begin)?, to_u8(end)?);
        self.update(|d| d.with_day(begin), |d| d.with_day(end))
    }

    /// Both dates change, or neither does
    fn update(
        &mut self,
        begin: impl FnOnce(&Date) -> Result<Date, DateError>,
        end: impl FnOnce(&Date) -> Result<Date, DateError>,
    ) -> Result<(), Notice> {
        let begin = begin(&self.begin).map_err(|_| INVALID_DATE)?;
        let end = end(&self.end).map_err(|_| INVALID_DATE)?;
        self.begin = begin;
        self.end = end;
        Ok(())
    }

    /// Make the pending dates the active window
    pub fn apply_pending(&mut self) -> Result<(), Notice> {
        self.window = DateWindow::new(self.begin, self.end).map_err(|_| END_BEFORE_BEGIN)?;

        #[cfg(feature = "defmt")]
        defmt::info!("Reporting window {} .. {}", self.window.begin(), self.window.end());
        Ok(())
    }

    /// Choose the year the rain result is computed for
    pub fn set_rain_year(&mut self, year: i32) -> Result<(), Notice> {
        let year = u16::try_from(year).map_err(|_| INVALID_YEAR)?;
        self.rain_year = Some(year);
        Ok(())
    }

    /// Fetch the newest reading; the previous one is kept when none arrives
    pub fn refresh_latest(&mut self) -> Option<Reading> {
        let reading = self.provider.latest()?;
        self.latest = Some(reading);
        Some(reading)
    }
}

fn to_u16(value: i32) -> Result<u16, Notice> {
    u16::try_from(value).map_err(|_| INVALID_DATE)
}

fn to_u8(value: i32) -> Result<u8, Notice> {
    u8::try_from(value).map_err(|_| INVALID_DATE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{date, reading, FixtureProvider};

    fn station() -> Station<FixtureProvider> {
        Station::new(FixtureProvider::new(), date(2024, 3, 15))
    }

    #[test]
    fn test_starts_on_today() {
        let s = station();
        assert_eq!(s.pending(), (date(2024, 3, 15), date(2024, 3, 15)));
        assert_eq!(s.window(), DateWindow::day(date(2024, 3, 15)));
        assert_eq!(s.rain_year(), None);
        assert!(s.latest().is_none());
    }

    #[test]
    fn test_pending_edits_apply_together() {
        let mut s = station();
        s.set_years(2023, 2024).unwrap();
        s.set_months(1, 2).unwrap();
        assert_eq!(s.pending(), (date(2023, 1, 15), date(2024, 2, 15)));

        // 31 February: neither date changes
        assert_eq!(s.set_days(1, 31), Err(INVALID_DATE));
        assert_eq!(s.pending(), (date(2023, 1, 15), date(2024, 2, 15)));

        s.set_days(1, 29).unwrap();
        assert_eq!(s.pending(), (date(2023, 1, 1), date(2024, 2, 29)));
        // Active window untouched until applied
        assert_eq!(s.window(), DateWindow::day(date(2024, 3, 15)));

        s.apply_pending().unwrap();
        assert_eq!(s.window().begin(), date(2023, 1, 1));
        assert_eq!(s.window().end(), date(2024, 2, 29));
    }

    #[test]
    fn test_leap_day_blocks_year_change() {
        let mut s = station();
        s.set_months(2, 2).unwrap();
        s.set_days(29, 29).unwrap();
        assert_eq!(s.set_years(2023, 2024), Err(INVALID_DATE));
        assert_eq!(s.set_years(-1, 2024), Err(INVALID_DATE));
        assert_eq!(s.pending().0, date(2024, 2, 29));
    }

    #[test]
    fn test_apply_rejects_reversed_window() {
        let mut s = station();
        s.set_days(20, 10).unwrap();
        assert_eq!(s.apply_pending(), Err(END_BEFORE_BEGIN));
        assert_eq!(s.window(), DateWindow::day(date(2024, 3, 15)));
    }

    #[test]
    fn test_rain_year() {
        let mut s = station();
        s.set_rain_year(2022).unwrap();
        assert_eq!(s.rain_year(), Some(2022));
        assert_eq!(s.set_rain_year(70_000), Err(INVALID_YEAR));
        assert_eq!(s.rain_year(), Some(2022));
    }

    #[test]
    fn test_refresh_keeps_last_reading() {
        let mut s = station();
        s.provider_mut().push_latest(None);
        assert!(s.refresh_latest().is_none());
        assert!(s.latest().is_none());

        let reading = reading(12, 30, 8.5, 21.0);
        s.provider_mut().push_latest(Some(reading));
        s.provider_mut().push_latest(None);
        assert_eq!(s.refresh_latest(), Some(reading));
        assert!(s.refresh_latest().is_none());
        assert_eq!(s.latest(), Some(&reading));
    }
}

use chrono::{Datelike, Duration, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("The week of {0} is outside the supported date range")]
pub struct WeekOutOfRange(pub NaiveDate);

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn monday_of(date: NaiveDate) -> Result<NaiveDate, WeekOutOfRange> {
    let day = date.weekday().num_days_from_sunday() as i64;
    let offset = if day == 0 { -6 } else { 1 - day };
    date.checked_add_signed(Duration::days(offset))
        .ok_or(WeekOutOfRange(date))
}

/// A Mon..Fri window whose five dates are all representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    dates: [NaiveDate; 5],
}

impl Week {
    pub fn containing(date: NaiveDate) -> Result<Self, WeekOutOfRange> {
        let monday = monday_of(date)?;
        let dates: [NaiveDate; 5] = monday
            .iter_days()
            .take(5)
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| WeekOutOfRange(date))?;
        Ok(Self { dates })
    }

    pub fn monday(&self) -> NaiveDate {
        self.dates[0]
    }

    pub fn friday(&self) -> NaiveDate {
        self.dates[4]
    }

    pub fn dates(&self) -> [NaiveDate; 5] {
        self.dates
    }

    pub fn next(&self) -> Result<Self, WeekOutOfRange> {
        let monday = self.monday();
        monday
            .checked_add_signed(Duration::weeks(1))
            .ok_or(WeekOutOfRange(monday))
            .and_then(Self::containing)
    }

    pub fn previous(&self) -> Result<Self, WeekOutOfRange> {
        let monday = self.monday();
        monday
            .checked_sub_signed(Duration::weeks(1))
            .ok_or(WeekOutOfRange(monday))
            .and_then(Self::containing)
    }
}

/// The week currently on display. Navigation past chrono's date range fails
/// and leaves the cursor where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    week: Week,
}

impl WeekCursor {
    pub fn new(today: NaiveDate) -> Result<Self, WeekOutOfRange> {
        Ok(Self {
            week: Week::containing(today)?,
        })
    }

    pub fn week(&self) -> Week {
        self.week
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week.monday()
    }

    pub fn week_dates(&self) -> [NaiveDate; 5] {
        self.week.dates()
    }

    pub fn next(&mut self) -> Result<(), WeekOutOfRange> {
        self.week = self.week.next()?;
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), WeekOutOfRange> {
        self.week = self.week.previous()?;
        Ok(())
    }

    pub fn reset(&mut self, today: NaiveDate) -> Result<(), WeekOutOfRange> {
        self.week = Week::containing(today)?;
        Ok(())
    }
}

use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schedule::time_grid::format_clock;

/// Weekdays the schedule grid has a column for, in column order.
pub const SCHEDULE_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// Column of `day` in the Mon..Fri grid, or `None` for weekend days.
pub fn day_column(day: Weekday) -> Option<usize> {
    SCHEDULE_DAYS.iter().position(|d| *d == day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = "uuid")]
pub struct ClassId(Uuid);

impl ClassId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClassId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ClassId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A class that repeats on the same weekdays between two dates (inclusive).
///
/// Instances are only built through [`crate::validation::validate_class_form`]
/// or deserialized from storage, and are never edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassEvent {
    pub id: ClassId,
    pub class_name: String,
    pub location: String,
    #[schema(value_type = String, format = "date", example = "2024-01-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = "date", example = "2024-05-01")]
    pub end_date: NaiveDate,
    #[schema(value_type = Vec<String>)]
    pub days: Vec<Weekday>,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "10:00:00")]
    pub end_time: NaiveTime,
}

impl ClassEvent {
    /// Whether any day of the class falls in `from..=to`.
    pub fn overlaps(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.start_date <= to && self.end_date >= from
    }
}

impl fmt::Display for ClassEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self
            .days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} @ {}, {} to {}, days: {}, {} - {}",
            self.class_name,
            self.location,
            self.start_date.format("%-m/%-d/%Y"),
            self.end_date.format("%-m/%-d/%Y"),
            days,
            format_clock(self.start_time),
            format_clock(self.end_time),
        )
    }
}

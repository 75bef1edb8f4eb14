use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::schedule::event::{ClassEvent, day_column};
use crate::schedule::time_grid::{
    END_HOUR, START_HOUR, minutes_of, row_count, row_labels, time_to_row,
};
use crate::schedule::week::Week;

/// One class block on the grid for a single displayed week.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct Placement {
    pub event: ClassEvent,
    /// 0 = Monday .. 4 = Friday.
    pub column: usize,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub start_row: i32,
    pub end_row: i32,
}

/// Everything a renderer needs to draw one week.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeekView {
    #[schema(value_type = Vec<String>)]
    pub week_dates: [NaiveDate; 5],
    #[schema(value_type = Vec<String>)]
    pub day_labels: [String; 5],
    pub row_labels: Vec<String>,
    pub placements: Vec<Placement>,
}

/// Computes the placements visible in `week`.
///
/// Classes overlapping the window produce one placement per Mon..Fri day
/// they recur on. Rows are clamped to the grid and every placement spans at
/// least one row; a class lying entirely outside grid hours produces nothing.
pub fn project(week: &Week, events: &[ClassEvent]) -> Vec<Placement> {
    let dates = week.dates();
    let last_row = row_count() + 1;

    let mut placements = Vec::new();
    for event in events
        .iter()
        .filter(|e| e.overlaps(week.monday(), week.friday()))
    {
        if minutes_of(event.end_time) <= START_HOUR * 60
            || minutes_of(event.start_time) >= END_HOUR * 60
        {
            continue;
        }
        let start_row = time_to_row(event.start_time).max(1);
        // Classes shorter than one increment still occupy their row.
        let end_row = time_to_row(event.end_time)
            .min(last_row)
            .max(start_row + 1);
        for column in event.days.iter().filter_map(|d| day_column(*d)) {
            placements.push(Placement {
                event: event.clone(),
                column,
                date: dates[column],
                start_row,
                end_row,
            });
        }
    }
    placements
}

pub fn week_view(week: &Week, events: &[ClassEvent]) -> WeekView {
    let dates = week.dates();
    WeekView {
        week_dates: dates,
        day_labels: dates.map(|d| d.format("%A (%-m/%-d)").to_string()),
        row_labels: row_labels(),
        placements: project(week, events),
    }
}

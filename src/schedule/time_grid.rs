use chrono::{NaiveTime, Timelike};

pub const START_HOUR: i32 = 8;
pub const END_HOUR: i32 = 18;
/// Minutes per grid row.
pub const INCREMENT_MIN: i32 = 30;

/// Number of increments between `START_HOUR` and `END_HOUR`. The grid has
/// `row_count() + 1` labelled rows, the last one being `END_HOUR:00`.
pub const fn row_count() -> i32 {
    (END_HOUR - START_HOUR) * 60 / INCREMENT_MIN
}

/// Converts a time of day to a 1-based grid row. Row 1 is `START_HOUR:00`.
///
/// Times outside the grid are not rejected: anything before the start hour
/// lands on row 0 or below, anything after the end hour past the last row.
pub fn time_to_row(time: NaiveTime) -> i32 {
    (minutes_of(time) - START_HOUR * 60).div_euclid(INCREMENT_MIN) + 1
}

/// Whole minutes since midnight; seconds are ignored.
pub fn minutes_of(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

pub fn row_to_label(row: i32) -> String {
    let minutes = (START_HOUR * 60 + (row - 1) * INCREMENT_MIN).rem_euclid(24 * 60);
    format_hour_min(minutes / 60, minutes % 60)
}

pub fn format_clock(time: NaiveTime) -> String {
    format_hour_min(time.hour() as i32, time.minute() as i32)
}

/// Labels for every row of the grid, `START_HOUR:00` through `END_HOUR:00`.
pub fn row_labels() -> Vec<String> {
    (1..=row_count() + 1).map(row_to_label).collect()
}

fn format_hour_min(hour: i32, minute: i32) -> String {
    let (display_hour, suffix) = match hour {
        0 => (12, "am"),
        12 => (12, "pm"),
        h if h > 12 => (h - 12, "pm"),
        h => (h, "am"),
    };
    format!("{display_hour}:{minute:02} {suffix}")
}

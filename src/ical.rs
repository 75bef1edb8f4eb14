use chrono::NaiveDateTime;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::schedule::WeekView;

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, week: &WeekView) -> Vec<u8> {
        if week.placements.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name(&format!("Class schedule, week of {}", week.week_dates[0]));

        for placement in &week.placements {
            let class = &placement.event;
            let mut event = Event::new();
            event.summary(&class.class_name);
            event.starts(NaiveDateTime::new(placement.date, class.start_time));
            event.ends(NaiveDateTime::new(placement.date, class.end_time));
            event.location(&class.location);
            event.description(&class.to_string());
            event.uid(&format!(
                "{}-{}@study-dashboard",
                class.id,
                placement.date.format("%Y%m%d")
            ));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Weekday};

    use super::*;
    use crate::schedule::{ClassEvent, ClassId, Week, week_view};

    #[test]
    fn test_generate_week() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let class = ClassEvent {
            id: ClassId::new(),
            class_name: "Algorithms".to_string(),
            location: "Room 4".to_string(),
            start_date: monday,
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            days: vec![Weekday::Mon, Weekday::Wed],
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        };
        let view = week_view(&Week::containing(monday).unwrap(), &[class]);
        let body = String::from_utf8(ICalExporter::new().generate(&view)).unwrap();
        assert_eq!(body.matches("BEGIN:VEVENT").count(), 2);
        assert!(body.contains("SUMMARY:Algorithms"));
        assert!(body.contains("20240103T090000"));
    }

    #[test]
    fn test_generate_empty() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bytes = ICalExporter::new().generate(&week_view(&Week::containing(monday).unwrap(), &[]));
        assert!(bytes.is_empty());
    }
}

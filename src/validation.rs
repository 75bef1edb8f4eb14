use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::schedule::event::{ClassEvent, ClassId, day_column};

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("at least one weekday must be selected")]
    NoDays,
    #[error("unknown weekday {0:?}, expected one of Mon, Tue, Wed, Thu, Fri")]
    UnknownDay(String),
    #[error("{field} {value:?} is not a valid date (YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} {value:?} is not a valid time (HH:MM)")]
    InvalidTime { field: &'static str, value: String },
    #[error("End date cannot be before start date")]
    EndDateBeforeStart,
    #[error("End time must be after start time")]
    EndTimeNotAfterStart,
}

/// Raw class form input, exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ClassForm {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    #[schema(example = "2024-01-01")]
    pub start_date: String,
    #[serde(default)]
    #[schema(example = "2024-05-01")]
    pub end_date: String,
    #[serde(default)]
    #[schema(example = json!(["Mon", "Wed"]))]
    pub days: Vec<String>,
    #[serde(default)]
    #[schema(example = "09:00")]
    pub start_time: String,
    #[serde(default)]
    #[schema(example = "10:00")]
    pub end_time: String,
}

/// Turns form input into a [`ClassEvent`] with a fresh id.
pub fn validate_class_form(form: &ClassForm) -> Result<ClassEvent, ValidationError> {
    let class_name = required("class_name", &form.class_name)?;
    let location = required("location", &form.location)?;
    let start_date = required("start_date", &form.start_date)?;
    let end_date = required("end_date", &form.end_date)?;
    let start_time = required("start_time", &form.start_time)?;
    let end_time = required("end_time", &form.end_time)?;

    let days = parse_days(&form.days)?;

    let start_date = parse_date("start_date", start_date)?;
    let end_date = parse_date("end_date", end_date)?;
    if end_date < start_date {
        return Err(ValidationError::EndDateBeforeStart);
    }

    let start_time = parse_time("start_time", start_time)?;
    let end_time = parse_time("end_time", end_time)?;
    if end_time <= start_time {
        return Err(ValidationError::EndTimeNotAfterStart);
    }

    Ok(ClassEvent {
        id: ClassId::new(),
        class_name: class_name.to_string(),
        location: location.to_string(),
        start_date,
        end_date,
        days,
        start_time,
        end_time,
    })
}

pub fn validate_task_text(text: &str) -> Result<&str, ValidationError> {
    required("text", text)
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_days(raw: &[String]) -> Result<Vec<Weekday>, ValidationError> {
    let mut days = Vec::with_capacity(raw.len());
    for value in raw {
        let day = value
            .trim()
            .parse::<Weekday>()
            .ok()
            .filter(|d| day_column(*d).is_some())
            .ok_or_else(|| ValidationError::UnknownDay(value.clone()))?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    if days.is_empty() {
        return Err(ValidationError::NoDays);
    }
    Ok(days)
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ValidationError::InvalidTime {
            field,
            value: value.to_string(),
        })
}

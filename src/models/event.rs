use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

use super::required;
use crate::errors::AppError;

/// Wire format for event dates, both in requests and listings.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDateTime,
    pub location: String,
}

fn serialize_date<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(DATE_FORMAT))
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>, // Format: "YYYY-MM-DD HH:MM:SS"
    pub location: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub location: String,
}

impl CreateEventRequest {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let (Some(title), Some(description), Some(date), Some(location)) = (
            required(self.title),
            required(self.description),
            required(self.date),
            required(self.location),
        ) else {
            return Err(AppError::Validation(
                "title, description, date and location are required".into(),
            ));
        };

        let date = parse_date(&date)?;

        Ok(NewEvent {
            title,
            description,
            date,
            location,
        })
    }
}

/// Parses a wire date. chrono accepts unpadded fields, so the value must also
/// format back to exactly the input.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, AppError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|parsed| parsed.format(DATE_FORMAT).to_string() == raw)
        .ok_or_else(|| {
            AppError::Validation(format!(
                "date {raw:?} does not match the format YYYY-MM-DD HH:MM:SS"
            ))
        })
}

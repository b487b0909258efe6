use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::models::event::{CreateEventRequest, Event};
use crate::state::AppState;

// Get all events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
    let events = sqlx::query_as::<_, Event>(
        "SELECT id, title, description, date, location FROM events ORDER BY id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(events))
}

// Create new event
pub async fn create_event(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateEventRequest>, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let event = payload.validate()?;

    let result = sqlx::query(
        "INSERT INTO events (title, description, date, location) VALUES (?, ?, ?, ?)",
    )
    .bind(&event.title)
    .bind(&event.description)
    .bind(event.date)
    .bind(&event.location)
    .execute(&state.db)
    .await?;

    info!(event_id = result.last_insert_rowid(), title = %event.title, "event created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Event created successfully"
        })),
    ))
}

// Delete event
pub async fn delete_event(
    State(state): State<AppState>,
    WithRejection(Path(event_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(event_id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("event"));
    }

    info!(event_id, "event deleted");

    Ok(Json(json!({
        "status": "success",
        "message": "Event deleted successfully"
    })))
}

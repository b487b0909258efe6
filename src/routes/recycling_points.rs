use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::WithRejection;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::database::run_migrations;
use crate::errors::AppError;
use crate::models::recycling_point::{CreateRecyclingPointRequest, RecyclingPoint};
use crate::state::AppState;

pub async fn init_db(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    run_migrations(&state.db).await?;

    Ok(Json(json!({
        "status": "success",
        "message": "Database initialized"
    })))
}

pub async fn list_recycling_points(
    State(state): State<AppState>,
) -> Result<Json<Vec<RecyclingPoint>>, AppError> {
    let points = sqlx::query_as::<_, RecyclingPoint>(
        "SELECT id, name, address, latitude, longitude, materials_accepted FROM recycling_point ORDER BY id",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(points))
}

/// Geocodes the address first; nothing is stored unless the provider returns a match.
pub async fn create_recycling_point(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateRecyclingPointRequest>, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let point = payload.validate()?;

    let Some(coordinates) = state.geocoder.geocode(&point.address).await? else {
        warn!(address = %point.address, "no geocoding result");
        return Err(AppError::Geocoding);
    };

    let result = sqlx::query(
        "INSERT INTO recycling_point (name, address, latitude, longitude, materials_accepted) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&point.name)
    .bind(&point.address)
    .bind(coordinates.latitude)
    .bind(coordinates.longitude)
    .bind(&point.materials_accepted)
    .execute(&state.db)
    .await?;

    info!(
        point_id = result.last_insert_rowid(),
        latitude = coordinates.latitude,
        longitude = coordinates.longitude,
        "recycling point created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "Recycling point added successfully"
        })),
    ))
}

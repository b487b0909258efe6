use axum::{extract::State, http::StatusCode, response::Json};
use axum_extra::extract::{CookieJar, WithRejection};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::user::{LoginRequest, RegisterRequest, User};
use crate::password::{hash_password_blocking, verify_password_blocking};
use crate::session::removal_cookie;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user = payload.validate()?;
    let password_hash = hash_password_blocking(user.password).await?;

    // users.email is UNIQUE, the insert itself detects duplicates
    let result = sqlx::query("INSERT INTO users (email, password_hash, name) VALUES (?, ?, ?)")
        .bind(&user.email)
        .bind(&password_hash)
        .bind(&user.name)
        .execute(&state.db)
        .await
        .map_err(|err| AppError::conflict_on_unique(err, "email is already registered"))?;

    info!(user_id = result.last_insert_rowid(), "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": "User registered successfully"
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, AppError>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let credentials = payload.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, name FROM users WHERE email = ?",
    )
    .bind(&credentials.email)
    .fetch_optional(&state.db)
    .await?;

    // Unknown email and wrong password must look the same to the client
    let Some(user) = user else {
        warn!("login for unknown email");
        return Err(AppError::Unauthorized);
    };
    if !verify_password_blocking(credentials.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, "login with wrong password");
        return Err(AppError::Unauthorized);
    }

    if let Some(previous) = state.sessions.from_jar(&jar).await? {
        state.sessions.destroy(previous.id).await?;
    }
    let session = state.sessions.create(user.id, &user.name).await?;
    info!(user_id = user.id, "user logged in");

    Ok((
        jar.add(session.cookie()),
        Json(json!({
            "status": "success",
            "message": "Login successful"
        })),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), AppError> {
    if let Some(session) = state.sessions.from_jar(&jar).await? {
        state.sessions.destroy(session.id).await?;
        info!(user_id = session.user_id, "user logged out");
    }

    Ok((
        jar.remove(removal_cookie()),
        Json(json!({
            "status": "success",
            "message": "Logged out"
        })),
    ))
}

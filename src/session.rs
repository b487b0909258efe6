//! Server-side login sessions.
//!
//! The client only ever holds an opaque id in the `session_id` cookie; the
//! user identity and expiry live in the `sessions` table.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use tracing::debug;
use uuid::Uuid;

use crate::database::Database;
use crate::errors::AppError;

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: i64,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, self.id.to_string());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie
    }
}

/// Cookie that tells the client to drop its session id.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

#[derive(Clone)]
pub struct SessionStore {
    db: Database,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(db: Database, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// Every login also sweeps sessions whose clients never came back.
    pub async fn create(&self, user_id: i64, user_name: &str) -> Result<Session, AppError> {
        self.cleanup_expired().await?;

        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            user_name: user_name.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        sqlx::query(
            "INSERT INTO sessions (id, user_id, user_name, created_at, expires_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.user_name)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.db)
        .await?;

        Ok(session)
    }

    /// Live session for `id`. Expired rows are removed and reported as absent.
    pub async fn lookup(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, user_id, user_name, created_at, expires_at FROM sessions WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        match session {
            Some(session) if session.expires_at <= Utc::now() => {
                debug!(session_id = %id, "session expired");
                self.destroy(id).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Deletes all expired rows and returns how many were removed.
    pub async fn cleanup_expired(&self) -> Result<u64, AppError> {
        // timestamps are stored as RFC 3339 text, compare them as instants
        let result = sqlx::query("DELETE FROM sessions WHERE julianday(expires_at) <= julianday(?)")
            .bind(Utc::now())
            .execute(&self.db)
            .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            debug!(removed, "expired sessions removed");
        }
        Ok(removed)
    }

    pub async fn destroy(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(())
    }

    /// Resolves the session cookie, if any, to a live session. Malformed ids count as no session.
    pub async fn from_jar(&self, jar: &CookieJar) -> Result<Option<Session>, AppError> {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(None);
        };
        let Ok(id) = Uuid::parse_str(cookie.value()) else {
            return Ok(None);
        };
        self.lookup(id).await
    }
}

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use ecopoint_be::database::{create_database_connection, run_migrations, Database};
use ecopoint_be::errors::AppError;
use ecopoint_be::geocoding::{Coordinates, Geocoder};
use ecopoint_be::{build_router, AppState};

pub const MADRID: Coordinates = Coordinates {
    latitude: 40.4168,
    longitude: -3.7038,
};

/// Answers every lookup with the same outcome and counts calls.
/// `Err` carries the message of a provider failure.
pub struct StubGeocoder {
    outcome: Result<Option<Coordinates>, String>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(AppError::Upstream)
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub geocoder: Arc<StubGeocoder>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// `name=value` pair of the session cookie set by this response.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|c| c.starts_with("session_id="))
            .and_then(|c| c.split(';').next())
            .map(str::to_string)
    }
}

pub async fn spawn_app(geocode_result: Option<Coordinates>) -> TestApp {
    spawn_app_with(Ok(geocode_result)).await
}

/// App whose geocoding provider is down.
pub async fn spawn_app_with_failing_geocoder() -> TestApp {
    spawn_app_with(Err("provider responded with 503 Service Unavailable".into())).await
}

async fn spawn_app_with(outcome: Result<Option<Coordinates>, String>) -> TestApp {
    let db = create_database_connection("sqlite::memory:", 1)
        .await
        .expect("in-memory database");
    run_migrations(&db).await.expect("migrations");

    let geocoder = Arc::new(StubGeocoder {
        outcome,
        calls: AtomicUsize::new(0),
    });
    let state = AppState::new(db.clone(), geocoder.clone(), chrono::Duration::hours(1));

    TestApp {
        router: build_router(state),
        db,
        geocoder,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.db)
            .await
            .unwrap()
    }
}

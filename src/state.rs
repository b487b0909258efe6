use std::sync::Arc;

use crate::database::Database;
use crate::geocoding::Geocoder;
use crate::session::SessionStore;

/// Handles shared by every handler, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub geocoder: Arc<dyn Geocoder>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: Database, geocoder: Arc<dyn Geocoder>, session_ttl: chrono::Duration) -> Self {
        let sessions = SessionStore::new(db.clone(), session_ttl);
        Self {
            db,
            geocoder,
            sessions,
        }
    }
}

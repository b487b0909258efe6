pub mod config;
pub mod database;
pub mod errors;
pub mod geocoding;
pub mod logging;
pub mod models;
pub mod password;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;

pub use routes::build_router;
pub use state::AppState;

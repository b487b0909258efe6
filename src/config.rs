use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://ecopoint.db";
pub const DEFAULT_OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com/geocode/v1/json";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_addr: SocketAddr,
    pub opencage_api_key: String,
    pub opencage_base_url: String,
    pub session_ttl: chrono::Duration,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5u32)?;
        if database_max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let server_addr = parse_or(
            &lookup,
            "SERVER_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3000)),
        )?;

        let opencage_api_key = lookup("OPENCAGE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("OPENCAGE_API_KEY must be set"))?;
        let opencage_base_url =
            lookup("OPENCAGE_BASE_URL").unwrap_or_else(|| DEFAULT_OPENCAGE_BASE_URL.into());

        let ttl_hours = parse_or(&lookup, "SESSION_TTL_HOURS", 24i64)?;
        if !(1..=24 * 365).contains(&ttl_hours) {
            bail!("SESSION_TTL_HOURS must be between 1 and 8760, got {ttl_hours}");
        }

        Ok(Self {
            database_url,
            database_max_connections,
            server_addr,
            opencage_api_key,
            opencage_base_url,
            session_ttl: chrono::Duration::hours(ttl_hours),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}

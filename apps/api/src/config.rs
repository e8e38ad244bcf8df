use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::FixedOffset;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service runs on the in-process record store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    /// Wall-clock offset used to decide the current month. Defaults to KST.
    pub clock_utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            database_max_connections: parse_env_or("DATABASE_MAX_CONNECTIONS", 10)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            clock_utc_offset: utc_offset(parse_env_or("CLOCK_UTC_OFFSET_HOURS", 9)?)?,
        })
    }
}

fn utc_offset(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .with_context(|| format!("CLOCK_UTC_OFFSET_HOURS must be between -23 and 23, got {hours}"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'"))
}

//! Server configuration.
//!
//! Read once at startup from the environment (after `dotenvy` has loaded
//! `.env`). Everything except the JWT secret has a local-development
//! default; a malformed value panics so a bad deployment dies immediately
//! instead of serving with surprise settings.

use std::fmt::Display;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address, `HOST` (default `0.0.0.0`).
    pub host: String,
    /// Bind port, `PORT` (default `3000`).
    pub port: u16,
    /// Allowed CORS origins, comma-separated `CORS_ORIGINS`
    /// (default `http://localhost:5173`).
    pub cors_origins: Vec<String>,
    /// Per-request timeout, `REQUEST_TIMEOUT_SECS` (default `30`).
    pub request_timeout_secs: u64,
    /// Token verification settings; see [`JwtConfig::from_env`].
    pub jwt: JwtConfig,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(name: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env_or(name, default);
    raw.parse()
        .unwrap_or_else(|e| panic!("{name}='{raw}' is not valid: {e}"))
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let cors_origins = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", "3000"),
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "30"),
            jwt: JwtConfig::from_env(),
        }
    }
}

use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

/// Deployment environment, controls CORS strictness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Absent or unreachable Redis falls back to the in-process store.
    pub redis_url: Option<String>,

    pub host: String,
    pub port: u16,
    pub app_env: AppEnv,
    pub frontend_url: String,

    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub jwt_expires_in_minutes: i64,
    pub jwt_refresh_expires_in_days: i64,

    pub results_cache_ttl_secs: u64,
    pub vote_marker_ttl_secs: u64,
    pub rate_limit_enabled: bool,

    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let app_env = match std::env::var("APP_ENV").as_deref() {
            Ok("production") => AppEnv::Production,
            _ => AppEnv::Development,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            redis_url: optional("REDIS_URL"),
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed("PORT", 3000)?,
            app_env,
            frontend_url: optional("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8081".to_string()),
            jwt_secret: required("JWT_SECRET")?,
            jwt_refresh_secret: required("JWT_REFRESH_SECRET")?,
            jwt_expires_in_minutes: parsed("JWT_EXPIRES_IN_MINUTES", 15)?,
            jwt_refresh_expires_in_days: parsed("JWT_REFRESH_EXPIRES_IN_DAYS", 7)?,
            results_cache_ttl_secs: parsed("RESULTS_CACHE_TTL_SECS", 5)?,
            vote_marker_ttl_secs: parsed("VOTE_MARKER_TTL_SECS", 86_400)?,
            rate_limit_enabled: parsed("RATE_LIMIT_ENABLED", true)?,
            admin_email: optional("ADMIN_EMAIL"),
            admin_password: optional("ADMIN_PASSWORD"),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

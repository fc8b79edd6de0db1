use actix_web::http::Uri;
use std::env;
use std::fmt;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:3001/shop";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidCorsOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(raw) => write!(f, "PORT must be a number between 0 and 65535, got '{}'", raw),
            ConfigError::InvalidCorsOrigin(raw) => write!(
                f,
                "CORS_ALLOWED_ORIGINS entries must look like scheme://host[:port], got '{}'",
                raw
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// An origin is a scheme and an authority with no path; `*` is rejected
/// because actix-cors refuses it at worker startup.
fn parse_origin(raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidCorsOrigin(raw.to_string());
    let uri: Uri = raw.parse().map_err(|_| invalid())?;

    let has_path = !matches!(uri.path(), "" | "/");
    if uri.scheme().is_none() || uri.host().is_none() || has_path || uri.query().is_some() {
        return Err(invalid());
    }
    Ok(raw.trim_end_matches('/').to_string())
}

impl Config {
    /// Reads HOST, PORT, DATABASE_URL and CORS_ALLOWED_ORIGINS.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let cors_allowed_origins: Vec<String> = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect::<Result<_, _>>()?;

        Ok(Config {
            host,
            port,
            database_url,
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON catalog file. The built-in catalog is used when unset.
    pub majors_catalog_path: Option<PathBuf>,
    pub default_top_k: usize,
    /// In-flight answers go to Redis when set, process memory otherwise.
    pub redis_url: Option<String>,
    /// Redis `EXPIRE` seconds; at least 1.
    pub session_ttl_secs: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            majors_catalog_path: None,
            default_top_k: 3,
            redis_url: None,
            session_ttl_secs: 3600,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let default_top_k = parse_or(&lookup, "DEFAULT_TOP_K", defaults.default_top_k)?;
        if default_top_k == 0 {
            bail!("DEFAULT_TOP_K must be at least 1");
        }

        let session_ttl_secs =
            parse_or(&lookup, "SESSION_TTL_SECS", defaults.session_ttl_secs)?;
        if session_ttl_secs < 1 {
            bail!("SESSION_TTL_SECS must be at least 1");
        }

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            majors_catalog_path: non_empty(lookup("MAJORS_CATALOG_PATH")).map(PathBuf::from),
            default_top_k,
            redis_url: non_empty(lookup("REDIS_URL")),
            session_ttl_secs,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        None => Ok(default),
    }
}

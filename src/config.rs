use crate::locale::Locale;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Front-end configuration loaded from environment variables.
///
/// | Env Var                   | Default                  |
/// |---------------------------|--------------------------|
/// | `BIND_ADDR`               | `127.0.0.1:3000`         |
/// | `API_BASE_URL`            | `http://localhost:5000`  |
/// | `REQUEST_TIMEOUT_SECS`    | `30`                     |
/// | `MAX_WORKERS`             | `8`                      |
/// | `SEARCH_SESSION_CAPACITY` | `256`                    |
/// | `DEFAULT_LOCALE`          | `en`                     |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the listings backend, without a trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub max_workers: usize,
    /// Upper bound on live per-session search controllers.
    pub search_session_capacity: usize,
    pub default_locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout: Duration::from_secs(30),
            max_workers: 8,
            search_session_capacity: 256,
            default_locale: Locale::En,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = lookup("BIND_ADDR") {
            cfg.bind_addr = v.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                reason: format!("{e}"),
            })?;
        }

        if let Some(v) = lookup("API_BASE_URL") {
            let v = v.trim().trim_end_matches('/').to_string();
            url::Url::parse(&v).map_err(|e| ConfigError::Invalid {
                var: "API_BASE_URL",
                reason: e.to_string(),
            })?;
            cfg.api_base_url = v;
        }

        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = parse_positive("REQUEST_TIMEOUT_SECS", &v)?;
            cfg.request_timeout = Duration::from_secs(secs as u64);
        }

        if let Some(v) = lookup("MAX_WORKERS") {
            cfg.max_workers = parse_positive("MAX_WORKERS", &v)?;
        }

        if let Some(v) = lookup("SEARCH_SESSION_CAPACITY") {
            cfg.search_session_capacity = parse_positive("SEARCH_SESSION_CAPACITY", &v)?;
        }

        if let Some(v) = lookup("DEFAULT_LOCALE") {
            cfg.default_locale = Locale::from_code(v.trim()).ok_or(ConfigError::Invalid {
                var: "DEFAULT_LOCALE",
                reason: format!("unsupported locale `{v}`"),
            })?;
        }

        Ok(cfg)
    }
}

fn parse_positive(var: &'static str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        Ok(_) => Err(ConfigError::Invalid {
            var,
            reason: "must be greater than zero".into(),
        }),
        Err(e) => Err(ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

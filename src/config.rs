//! Runtime configuration, read from the process environment after loading `.env`.

use crate::error::{AppError, Result};
use std::{env, fmt::Display, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEMO_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_IMAGES_BASE_URL: &str = "https://images-api.nasa.gov";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Key sent as `api_key` to api.nasa.gov. Empty means "not configured".
    pub nasa_api_key: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Origin allowed by CORS (the dashboard frontend).
    pub cors_origin: String,
    pub api_base_url: String,
    pub images_base_url: String,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub log_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nasa_api_key: DEMO_API_KEY.to_string(),
            host: "0.0.0.0".to_string(),
            port: 3002,
            environment: "development".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            images_base_url: DEFAULT_IMAGES_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            log_format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and then reads the environment.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Reads configuration from the current process environment only.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let nasa_api_key =
            env::var("NASA_API_KEY").unwrap_or_else(|_| DEMO_API_KEY.to_string());

        let environment = var("APP_ENV")
            .or_else(|| var("NODE_ENV"))
            .unwrap_or(defaults.environment);

        let timeout_secs: u64 = parse_or("REQUEST_TIMEOUT_SECS", 10)?;

        Ok(Self {
            nasa_api_key: nasa_api_key.trim().to_string(),
            host: var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port)?,
            environment,
            cors_origin: var("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            api_base_url: var("NASA_API_BASE_URL").unwrap_or(defaults.api_base_url),
            images_base_url: var("NASA_IMAGES_BASE_URL").unwrap_or(defaults.images_base_url),
            request_timeout: Duration::from_secs(timeout_secs),
            log_format: parse_or("LOG_FORMAT", defaults.log_format)?,
            log_dir: var("LOG_DIR"),
        })
    }

    pub fn api_key_configured(&self) -> bool {
        !self.nasa_api_key.is_empty()
    }

    pub fn uses_demo_key(&self) -> bool {
        self.nasa_api_key == DEMO_API_KEY
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Logs the effective configuration without revealing the key.
    ///
    /// Call after the subscriber is installed; `from_env` runs too early to log.
    pub fn log_summary(&self) {
        let key_status = if !self.api_key_configured() {
            "not configured"
        } else if self.uses_demo_key() {
            "using DEMO_KEY (limited access)"
        } else {
            "configured"
        };
        info!(
            environment = %self.environment,
            port = self.port,
            "NASA API key is {key_status}"
        );
        if !self.api_key_configured() {
            warn!("NASA API key is not configured. Some API features may not work.");
        } else if self.uses_demo_key() {
            warn!("NASA_API_KEY not set, using {DEMO_API_KEY} (limited access)");
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("invalid {key} '{raw}': {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    const KEYS: [&str; 11] = [
        "NASA_API_KEY",
        "HOST",
        "PORT",
        "APP_ENV",
        "NODE_ENV",
        "CORS_ORIGIN",
        "NASA_API_BASE_URL",
        "NASA_IMAGES_BASE_URL",
        "REQUEST_TIMEOUT_SECS",
        "LOG_FORMAT",
        "LOG_DIR",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_environment_is_empty() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.nasa_api_key, DEMO_API_KEY);
        assert!(config.uses_demo_key());
        assert_eq!(config.port, 3002);
        assert_eq!(config.environment, "development");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.log_dir.is_none());
        assert_eq!(config.images_base_url, DEFAULT_IMAGES_BASE_URL);
    }

    #[test]
    #[serial]
    fn images_base_url_can_be_overridden() {
        clear_env();
        env::set_var("NASA_IMAGES_BASE_URL", "http://127.0.0.1:9000");
        let config = Config::from_env().unwrap();
        assert_eq!(config.images_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        clear_env();
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn summary_output(config: &Config) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.log_summary());
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    #[serial]
    fn demo_key_warning_is_emitted_by_the_summary() {
        clear_env();
        let config = Config::from_env().unwrap();
        let output = summary_output(&config);
        assert!(output.contains("WARN"));
        assert!(output.contains("using DEMO_KEY"));
    }

    #[test]
    fn configured_key_does_not_warn() {
        let config = Config {
            nasa_api_key: "abc123".to_string(),
            ..Config::default()
        };
        let output = summary_output(&config);
        assert!(output.contains("NASA API key is configured"));
        assert!(!output.contains("WARN"));
        assert!(!output.contains("abc123"));
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("NASA_API_KEY", " abc123 ");
        env::set_var("PORT", "8080");
        env::set_var("NODE_ENV", "production");
        env::set_var("LOG_FORMAT", "JSON");
        let config = Config::from_env().unwrap();
        assert_eq!(config.nasa_api_key, "abc123");
        assert!(!config.uses_demo_key());
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        clear_env();
    }

    #[test]
    #[serial]
    fn app_env_takes_precedence_over_node_env() {
        clear_env();
        env::set_var("APP_ENV", "staging");
        env::set_var("NODE_ENV", "production");
        assert_eq!(Config::from_env().unwrap().environment, "staging");
        clear_env();
    }

    #[test]
    #[serial]
    fn empty_key_is_not_configured() {
        clear_env();
        env::set_var("NASA_API_KEY", "");
        let config = Config::from_env().unwrap();
        assert!(!config.api_key_configured());
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_port_is_a_config_error() {
        clear_env();
        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("PORT")));
        clear_env();
    }
}

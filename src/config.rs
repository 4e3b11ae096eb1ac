//! Configuration management for i18n-typegen
//!
//! Settings are loaded from environment variables with sensible defaults;
//! command-line flags override them afterwards.
//!
//! # Environment Variables
//!
//! - `I18N_TYPEGEN_TYPED_OPTIONS`: Enable type generation (true|false) - default: "true"
//! - `I18N_TYPEGEN_MODE`: Session mode (development|production) - default: "development"
//! - `I18N_TYPEGEN_DEV_SERVER_URL`: Dev server root URL - default: "http://localhost:3000/"
//! - `I18N_TYPEGEN_REQUEST_TIMEOUT`: Fetch timeout in seconds - default: "10"
//! - `I18N_TYPEGEN_OUT_DIR`: Build directory receiving the artifact - default: ".i18n-typegen"
//! - `I18N_TYPEGEN_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use i18n_typegen::TypegenConfig;
//!
//! let config = TypegenConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! if config.is_enabled() {
//!     println!("{}", config);
//! }
//! ```

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TYPED_OPTIONS: bool = true;
const DEFAULT_DEV_SERVER_URL: &str = "http://localhost:3000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OUT_DIR: &str = ".i18n-typegen";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid session mode
    #[error("Invalid mode: {0}. Valid options: development, production")]
    InvalidMode(String),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Whether the host session is a development or production build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Development,
    Production,
}

impl FromStr for SessionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(SessionMode::Development),
            "production" | "prod" => Ok(SessionMode::Production),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Development => write!(f, "development"),
            SessionMode::Production => write!(f, "production"),
        }
    }
}

/// Main configuration structure for i18n-typegen
#[derive(Debug, Clone)]
pub struct TypegenConfig {
    /// Master switch; `false` disables generation unconditionally
    pub typed_options_and_messages: bool,

    /// Generation only runs in development sessions
    pub mode: SessionMode,

    /// Root URL of the dev server exposing the merged options endpoint
    pub dev_server_url: String,

    /// Fetch timeout in seconds
    pub request_timeout_secs: u64,

    /// Build directory the artifact is written below
    pub out_dir: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TypegenConfig {
    /// Loads I18N_TYPEGEN_* environment variables, falling back to defaults
    ///
    /// Unparseable values fall back to their defaults; use [`TypegenConfig::from_env`]
    /// to surface them as errors instead.
    fn default() -> Self {
        Self {
            typed_options_and_messages: env::var("I18N_TYPEGEN_TYPED_OPTIONS")
                .ok()
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(DEFAULT_TYPED_OPTIONS),
            mode: env::var("I18N_TYPEGEN_MODE")
                .ok()
                .and_then(|v| v.parse::<SessionMode>().ok())
                .unwrap_or(SessionMode::Development),
            dev_server_url: env::var("I18N_TYPEGEN_DEV_SERVER_URL")
                .unwrap_or_else(|_| DEFAULT_DEV_SERVER_URL.to_string()),
            request_timeout_secs: env::var("I18N_TYPEGEN_REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            out_dir: env::var("I18N_TYPEGEN_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUT_DIR)),
            log_level: env::var("I18N_TYPEGEN_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl TypegenConfig {
    /// Strict variant of `default()`: malformed values are errors
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(v) = env::var("I18N_TYPEGEN_TYPED_OPTIONS") {
            config.typed_options_and_messages = parse_field("I18N_TYPEGEN_TYPED_OPTIONS", &v)?;
        }
        if let Ok(v) = env::var("I18N_TYPEGEN_MODE") {
            config.mode = v.parse()?;
        }
        if let Ok(v) = env::var("I18N_TYPEGEN_REQUEST_TIMEOUT") {
            config.request_timeout_secs = parse_field("I18N_TYPEGEN_REQUEST_TIMEOUT", &v)?;
        }

        Ok(config)
    }

    /// Whether the generation machinery should be wired up at all
    pub fn is_enabled(&self) -> bool {
        self.typed_options_and_messages && self.mode == SessionMode::Development
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any validation fails
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if !(self.dev_server_url.starts_with("http://") || self.dev_server_url.starts_with("https://")) {
            return Err(ConfigError::ValidationFailed(format!(
                "Dev server URL must start with http:// or https://: {}",
                self.dev_server_url
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

fn parse_field<T>(field: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|e| ConfigError::ParseError {
        field: field.to_string(),
        error: e.to_string(),
    })
}

impl fmt::Display for TypegenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "i18n-typegen Configuration:")?;
        writeln!(f, "  Typed Options: {}", self.typed_options_and_messages)?;
        writeln!(f, "  Mode: {}", self.mode)?;
        writeln!(f, "  Dev Server: {}", self.dev_server_url)?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Out Dir: {}", self.out_dir.display())?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn clear_all() -> Vec<EnvGuard> {
        [
            "I18N_TYPEGEN_TYPED_OPTIONS",
            "I18N_TYPEGEN_MODE",
            "I18N_TYPEGEN_DEV_SERVER_URL",
            "I18N_TYPEGEN_REQUEST_TIMEOUT",
            "I18N_TYPEGEN_OUT_DIR",
            "I18N_TYPEGEN_LOG_LEVEL",
        ]
        .iter()
        .map(|k| EnvGuard::unset(k))
        .collect()
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = clear_all();

        let config = TypegenConfig::default();

        assert!(config.typed_options_and_messages);
        assert_eq!(config.mode, SessionMode::Development);
        assert_eq!(config.dev_server_url, DEFAULT_DEV_SERVER_URL);
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.out_dir, PathBuf::from(DEFAULT_OUT_DIR));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _clear = clear_all();
        let _guards = vec![
            EnvGuard::set("I18N_TYPEGEN_TYPED_OPTIONS", "false"),
            EnvGuard::set("I18N_TYPEGEN_MODE", "production"),
            EnvGuard::set("I18N_TYPEGEN_DEV_SERVER_URL", "http://127.0.0.1:4000/"),
            EnvGuard::set("I18N_TYPEGEN_REQUEST_TIMEOUT", "30"),
            EnvGuard::set("I18N_TYPEGEN_OUT_DIR", "/tmp/build"),
            EnvGuard::set("I18N_TYPEGEN_LOG_LEVEL", "DEBUG"),
        ];

        let config = TypegenConfig::default();

        assert!(!config.typed_options_and_messages);
        assert_eq!(config.mode, SessionMode::Production);
        assert_eq!(config.dev_server_url, "http://127.0.0.1:4000/");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.out_dir, PathBuf::from("/tmp/build"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_malformed_values() {
        let _clear = clear_all();
        let _guard = EnvGuard::set("I18N_TYPEGEN_REQUEST_TIMEOUT", "soon");

        assert!(matches!(
            TypegenConfig::from_env(),
            Err(ConfigError::ParseError { .. })
        ));
        // Lenient loading falls back to the default
        assert_eq!(
            TypegenConfig::default().request_timeout_secs,
            DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_mode() {
        let _clear = clear_all();
        let _guard = EnvGuard::set("I18N_TYPEGEN_MODE", "staging");
        assert!(matches!(TypegenConfig::from_env(), Err(ConfigError::InvalidMode(_))));
    }

    #[test]
    #[serial]
    fn test_is_enabled_requires_both_flags() {
        let _clear = clear_all();
        let mut config = TypegenConfig::default();
        assert!(config.is_enabled());

        config.mode = SessionMode::Production;
        assert!(!config.is_enabled());

        config.mode = SessionMode::Development;
        config.typed_options_and_messages = false;
        assert!(!config.is_enabled());
    }

    #[test]
    #[serial]
    fn test_validation() {
        let _clear = clear_all();
        let mut config = TypegenConfig::default();

        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 601;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 10;
        config.dev_server_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        config.dev_server_url = DEFAULT_DEV_SERVER_URL.to_string();
        config.log_level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("dev".parse::<SessionMode>().unwrap(), SessionMode::Development);
        assert_eq!("PRODUCTION".parse::<SessionMode>().unwrap(), SessionMode::Production);
        assert!("test".parse::<SessionMode>().is_err());
    }

    #[test]
    #[serial]
    fn test_display() {
        let _clear = clear_all();
        let output = TypegenConfig::default().to_string();
        assert!(output.contains("i18n-typegen Configuration:"));
        assert!(output.contains("Mode: development"));
        assert!(output.contains("Request Timeout: 10s"));
    }
}

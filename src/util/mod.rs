//! Utility modules for i18n-typegen

pub mod logging;

pub use logging::{config_from_env, init_from_env, init_logging, LoggingConfig};

//! Shared configuration and tabular data model for TFI.

pub mod app_config;
pub mod config;
pub mod loader;
pub mod table;

use thiserror::Error;

pub use app_config::{AppConfig, EmbedderKind, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use loader::{load_table, LoadError};
pub use table::{Cell, Column, ColumnKind, ColumnValues, Table};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

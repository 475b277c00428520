pub mod app_config;
pub mod config;
pub mod filter;
pub mod search;
pub mod wine;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use filter::apply_filters;
pub use search::{Destination, FilterBounds, SearchRequest};
pub use wine::WineRecord;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("invalid filter bound {name}: {value} (must be a finite, non-negative number)")]
    InvalidBound { name: &'static str, value: f64 },
}

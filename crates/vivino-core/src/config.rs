use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.vivino.com";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.116 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so parsing can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("VIVINO_BASE_URL", DEFAULT_BASE_URL);
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIVINO_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{base_url}\""),
        });
    }
    let base_url = base_url.trim_end_matches('/').to_string();

    let user_agent = or_default("VIVINO_USER_AGENT", DEFAULT_USER_AGENT);
    let log_level = or_default("VIVINO_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("VIVINO_OUTPUT_DIR", "."));

    let request_timeout_secs = parse_u64("VIVINO_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("VIVINO_MAX_RETRIES", "5")?;
    let pause_multiplier_secs = parse_u64("VIVINO_PAUSE_MULTIPLIER_SECS", "15")?;

    Ok(AppConfig {
        base_url,
        user_agent,
        log_level,
        output_dir,
        request_timeout_secs,
        max_retries,
        pause_multiplier_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

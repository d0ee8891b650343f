use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let env = parse_environment(&or_default("VIDINTEL_ENV", "development"));
    let bind_addr = parse_addr("VIDINTEL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("VIDINTEL_LOG_LEVEL", "info");
    let youtube_api_key = lookup("YOUTUBE_API_KEY").ok();

    let youtube_timeout_secs = parse_u64("VIDINTEL_YT_TIMEOUT_SECS", "30")?;
    let youtube_max_retries = parse_u32("VIDINTEL_YT_MAX_RETRIES", "3")?;
    let youtube_backoff_base_ms = parse_u64("VIDINTEL_YT_BACKOFF_BASE_MS", "1000")?;
    let search_window_days = parse_u32("VIDINTEL_SEARCH_WINDOW_DAYS", "180")?;
    let max_results = parse_u32("VIDINTEL_MAX_RESULTS", "50")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        youtube_api_key,
        youtube_timeout_secs,
        youtube_max_retries,
        youtube_backoff_base_ms,
        search_window_days,
        max_results,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

use crate::app_config::{AppConfig, EmbedderKind, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
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
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration pointed at a local TEI server.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("TFI_ENV", "development"))?;
    let log_level = or_default("TFI_LOG_LEVEL", "info");
    let embedder = parse_embedder(&or_default("TFI_EMBEDDER", "tei"))?;
    let tei_url = or_default("TFI_TEI_URL", "http://localhost:8080")
        .trim_end_matches('/')
        .to_string();
    if tei_url.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TFI_TEI_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    let tei_timeout_secs = parse_u64("TFI_TEI_TIMEOUT_SECS", "30")?;
    let tei_batch_size = parse_positive_usize("TFI_TEI_BATCH_SIZE", "64")?;
    let hashing_dimensions = parse_positive_usize("TFI_HASHING_DIMENSIONS", "384")?;

    Ok(AppConfig {
        env,
        log_level,
        embedder,
        tei_url,
        tei_timeout_secs,
        tei_batch_size,
        hashing_dimensions,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TFI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse the embedding backend name. Case-insensitive.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than `tei` or `hashing`.
fn parse_embedder(s: &str) -> Result<EmbedderKind, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "tei" => Ok(EmbedderKind::Tei),
        "hashing" => Ok(EmbedderKind::Hashing),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TFI_EMBEDDER".to_string(),
            reason: format!("unknown embedder '{other}' (expected 'tei' or 'hashing')"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

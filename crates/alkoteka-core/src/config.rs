use thiserror::Error;

/// Locality slug used when the caller supplies none.
pub const DEFAULT_LOCALITY: &str = "krasnodar";

/// Root category slugs harvested when `ALKOTEKA_CATEGORIES` is unset.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "bezalkogolnye-napitki-1",
    "krepkiy-alkogol",
    "slaboalkogolnye-napitki-2",
    "shampanskoe-i-igristoe",
    "vino",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime settings for a harvest run. Every field has a default, so the
/// harvester is runnable with zero configuration.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Origin of the catalog web API, no trailing slash.
    pub base_url: String,
    /// Target locality slug, matched case-insensitively against the
    /// locality directory.
    pub locality: String,
    /// Root category slugs to enumerate.
    pub categories: Vec<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Cap on in-flight product detail fetches.
    pub max_concurrent_details: usize,
    pub log_level: String,
}

/// Load harvest configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading
/// env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_config() -> Result<HarvestConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load harvest configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a set env var has an invalid value.
pub fn load_config_from_env() -> Result<HarvestConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build the configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_config<F>(lookup: F) -> Result<HarvestConfig, ConfigError>
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = or_default("ALKOTEKA_BASE_URL", "https://alkoteka.com")
        .trim_end_matches('/')
        .to_string();
    let locality = or_default("ALKOTEKA_LOCALITY", DEFAULT_LOCALITY);
    let categories = match lookup("ALKOTEKA_CATEGORIES") {
        Ok(raw) => parse_categories("ALKOTEKA_CATEGORIES", &raw)?,
        Err(_) => DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect(),
    };
    let request_timeout_secs = parse_u64("ALKOTEKA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ALKOTEKA_USER_AGENT", "alkoteka-harvester/0.1");
    let max_concurrent_details = parse_usize("ALKOTEKA_MAX_CONCURRENT_DETAILS", "16")?;
    let log_level = or_default("ALKOTEKA_LOG_LEVEL", "info");

    Ok(HarvestConfig {
        base_url,
        locality,
        categories,
        request_timeout_secs,
        user_agent,
        max_concurrent_details,
        log_level,
    })
}

/// Split a comma-separated category list, dropping surrounding whitespace.
///
/// An all-whitespace value is rejected: a harvest run with zero categories
/// can only emit zero records, which is never intended.
fn parse_categories(var: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let categories: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    if categories.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "no category slugs in value".to_string(),
        });
    }
    Ok(categories)
}

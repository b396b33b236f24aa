use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "nutri.toml",
    "config/nutri.toml",
    "crates/config/nutri.toml",
    "../nutri.toml",
    "../config/nutri.toml",
];

/// Plain environment variables understood for compatibility with the
/// hosted backend's own tooling (`.env` files exported by the dashboard)
/// and with hosts that assign the listen port through `PORT`.
const SUPABASE_URL_ENV: &str = "SUPABASE_URL";
const SUPABASE_KEY_ENV: &str = "SUPABASE_KEY";
const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub supabase: SupabaseConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub address: String,
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Connection settings for the managed backend (auth + table API).
///
/// ```
/// use nutri_config::SupabaseConfig;
///
/// let supabase = SupabaseConfig::default();
/// assert_eq!(supabase.url, "http://localhost:54321");
/// assert_eq!(supabase.request_timeout_seconds, 30);
/// assert!(supabase.api_key.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    #[serde(default = "SupabaseConfig::default_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "SupabaseConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl SupabaseConfig {
    fn default_url() -> String {
        "http://localhost:54321".to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            api_key: String::new(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "CorsConfig::default_origins")]
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    fn default_origins() -> Vec<String> {
        vec!["http://localhost:5173".to_string()]
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Self::default_origins(),
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use nutri_config::load;
///
/// std::env::remove_var("NUTRI_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.http.address.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let timeout = i64::try_from(defaults.supabase.request_timeout_seconds).unwrap_or(i64::MAX);

    let mut builder = config::Config::builder()
        .set_default("http.address", defaults.http.address.clone())?
        .set_default("http.port", i64::from(defaults.http.port))?
        .set_default("supabase.url", defaults.supabase.url.clone())?
        .set_default("supabase.api_key", defaults.supabase.api_key.clone())?
        .set_default("supabase.request_timeout_seconds", timeout)?
        .set_default("cors.allowed_origins", defaults.cors.allowed_origins.clone())?;

    let environment_overrides = config::Environment::with_prefix("NUTRI")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true);

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("NUTRI_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via NUTRI_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    let port = std::env::var(PORT_ENV)
        .ok()
        .map(|value| {
            value
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{PORT_ENV} is not a valid port: {value}"))
        })
        .transpose()?;

    builder = builder
        .add_source(environment_overrides)
        .set_override_option("http.port", port.map(i64::from))?
        .set_override_option("supabase.url", std::env::var(SUPABASE_URL_ENV).ok())?
        .set_override_option("supabase.api_key", std::env::var(SUPABASE_KEY_ENV).ok())?;

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    config.supabase.url = config.supabase.url.trim_end_matches('/').to_string();

    debug!(
        http = ?config.http,
        supabase_url = %config.supabase.url,
        cors = ?config.cors.allowed_origins,
        "loaded backend configuration"
    );
    Ok(config)
}

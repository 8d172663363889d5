//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GM_DATA_DIR` - Directory for the file-backed cart store (default: `.go-marketplace`)
//! - `GM_STORAGE_KEY` - Key the cart is stored under (default: `@GoMarketplace:shoppingCartList`)
//! - `GM_CURRENCY` - ISO 4217 code used to display prices (default: BRL)
//! - `GM_API_BASE_URL` - Catalogue backend base URL (default: `http://10.0.2.2:3333`)
//! - `GM_API_TIMEOUT_SECS` - Catalogue request timeout in seconds (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use go_marketplace_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::store::DEFAULT_STORAGE_KEY;

const DEFAULT_DATA_DIR: &str = ".go-marketplace";
const DEFAULT_CURRENCY: &str = "BRL";
/// Android emulator alias for the host machine's localhost.
const DEFAULT_API_BASE_URL: &str = "http://10.0.2.2:3333";
const DEFAULT_API_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the file-backed store
    pub data_dir: PathBuf,
    /// Key the cart blob is stored under
    pub storage_key: String,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
    /// Catalogue API configuration
    pub api: ApiConfig,
}

/// Catalogue backend configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL every request path is joined onto
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get("GM_DATA_DIR", DEFAULT_DATA_DIR));

        let storage_key = get("GM_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "GM_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let currency_code = get("GM_CURRENCY", DEFAULT_CURRENCY);
        let currency = CurrencyCode::from_code(&currency_code).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "GM_CURRENCY".to_string(),
                format!("unsupported currency '{currency_code}'"),
            )
        })?;

        let api = ApiConfig {
            base_url: Url::parse(&get("GM_API_BASE_URL", DEFAULT_API_BASE_URL)).map_err(|e| {
                ConfigError::InvalidEnvVar("GM_API_BASE_URL".to_string(), e.to_string())
            })?,
            timeout: get("GM_API_TIMEOUT_SECS", DEFAULT_API_TIMEOUT_SECS)
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("GM_API_TIMEOUT_SECS".to_string(), e.to_string())
                })?,
        };

        Ok(Self {
            data_dir,
            storage_key,
            currency,
            api,
        })
    }
}

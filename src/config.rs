use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main planner configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where favorites are persisted
    #[serde(default)]
    pub storage: StorageConfig,
    /// Number of search results shown per page
    #[serde(default = "default_results_per_page")]
    pub results_per_page: usize,
    /// Servings assumed when a recipe does not state its own
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

/// Configuration for the recipe API client
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the Forkify-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for favorites storage
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding the storage file
    #[serde(default = "default_storage_directory")]
    pub directory: PathBuf,
    /// Well-known key the favorites are stored under
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            storage: StorageConfig::default(),
            results_per_page: default_results_per_page(),
            default_servings: default_servings(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_storage_directory(),
            key: default_storage_key(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://forkify-api.herokuapp.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_storage_directory() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recipe-planner")
}

fn default_storage_key() -> String {
    "likes".to_string()
}

fn default_results_per_page() -> usize {
    10
}

fn default_servings() -> u32 {
    4
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    ///
    /// See [`load_config`] for the source priority.
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_PLANNER__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_PLANNER__API__BASE_URL
pub fn load_config() -> Result<PlannerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_PLANNER__STORAGE__KEY
        .add_source(
            Environment::with_prefix("RECIPE_PLANNER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

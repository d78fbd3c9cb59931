use crate::errors::{MinutesError, MinutesResult};
use crate::schema::SECRETARY_INSTRUCTION;
use crate::types::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default Gemini REST endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for note analysis and record storage
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MinutesConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub system_prompt: Option<String>,
    pub api_base_url: Option<String>,
    /// Return canned results instead of calling the model
    pub use_dummy_ai: Option<bool>,
    /// Directory holding saved meeting records
    pub data_dir: Option<PathBuf>,
}

impl MinutesConfig {
    /// Built-in values, used as the lowest-precedence layer
    pub fn defaults() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL.to_string()),
            system_prompt: Some(SECRETARY_INSTRUCTION.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            use_dummy_ai: Some(false),
            data_dir: None,
        }
    }

    /// Loads configuration from a file if it exists, otherwise returns an empty layer
    pub fn load_from_file(path: &Path) -> MinutesResult<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                MinutesError::ConfigError(format!("Failed to read config file: {}", e))
            })?;

            let config: Self = toml::from_str(&content).map_err(|e| {
                MinutesError::ConfigError(format!("Failed to parse config file: {}", e))
            })?;

            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Layer read from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Layer read through an arbitrary variable lookup.
    ///
    /// `GEMINI_API_KEY` wins over `API_KEY`; `USE_DUMMY_AI` is on only when it
    /// equals `true` (case-insensitive), and `false` when set to anything else.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model_name: non_empty("MINUTES_MODEL"),
            system_prompt: None,
            api_base_url: non_empty("MINUTES_API_BASE_URL"),
            use_dummy_ai: non_empty("USE_DUMMY_AI").map(|v| v.trim().eq_ignore_ascii_case("true")),
            data_dir: non_empty("MINUTES_DATA_DIR").map(PathBuf::from),
        }
    }

    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            system_prompt: other
                .system_prompt
                .clone()
                .or_else(|| self.system_prompt.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
            use_dummy_ai: other.use_dummy_ai.or(self.use_dummy_ai),
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
        }
    }

    pub fn dummy_mode(&self) -> bool {
        self.use_dummy_ai.unwrap_or(false)
    }

    /// Directory for saved records, falling back to the platform data directory
    pub fn resolved_data_dir(&self, app_name: &str) -> MinutesResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir().ok_or_else(|| {
            MinutesError::ConfigError("Could not determine data directory".to_string())
        })?;
        Ok(data_dir.join(app_name))
    }
}

/// Helper function to get default config directory
pub fn get_default_config_dir(app_name: &str) -> MinutesResult<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        MinutesError::ConfigError("Could not determine home directory".to_string())
    })?;

    Ok(home_dir.join(".config").join(app_name))
}

/// Helper function to get default config file path
pub fn get_default_config_file(app_name: &str) -> MinutesResult<PathBuf> {
    let config_dir = get_default_config_dir(app_name)?;
    Ok(config_dir.join("config.toml"))
}

/// Resolve the effective configuration: defaults, then the TOML file, then the environment.
pub fn load_layered(config_file: Option<&Path>, app_name: &str) -> MinutesResult<MinutesConfig> {
    let path = match config_file {
        Some(path) => path.to_path_buf(),
        None => get_default_config_file(app_name)?,
    };
    let file_layer = MinutesConfig::load_from_file(&path)?;
    Ok(MinutesConfig::defaults()
        .merge(&file_layer)
        .merge(&MinutesConfig::from_env()))
}

use crate::error::{Result, WaterMeError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: Option<OpenWeatherMapConfig>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(WaterMeError::Config(format!(
                "Config file not found at {:?}",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| WaterMeError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| WaterMeError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| WaterMeError::Config("Cannot determine config directory".into()))?
            .join("waterme")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

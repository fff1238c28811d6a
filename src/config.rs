use crate::error::{Result, SkyglanceError};
use crate::models::GeoLocation;
use dialoguer::{Input, Password, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_FORECAST_HOST: &str = "open-weather13.p.rapidapi.com";
const DEFAULT_GEOLOCATION_URL: &str = "https://ipapi.co/json/";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub forecast: ForecastApiConfig,
    #[serde(default)]
    pub geolocation: GeoLocationConfig,
    /// Fixed location; skips the GeoIP lookup when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct ForecastApiConfig {
    pub api_key: String,
    #[serde(default = "default_forecast_host")]
    pub host: String,
    #[serde(default = "default_forecast_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub units: Units,
}

fn default_forecast_host() -> String {
    DEFAULT_FORECAST_HOST.to_string()
}

fn default_forecast_base_url() -> String {
    format!("https://{}", DEFAULT_FORECAST_HOST)
}

impl std::fmt::Debug for ForecastApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("host", &self.host)
            .field("base_url", &self.base_url)
            .field("units", &self.units)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoLocationConfig {
    pub url: String,
}

impl Default for GeoLocationConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEOLOCATION_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the forecast API `units` parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn speed_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(SkyglanceError::Config(format!(
                "Config file not found at {:?}. Run `skyglance init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SkyglanceError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    /// Parse YAML after `${VAR}` substitution
    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| SkyglanceError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Reject configs that cannot possibly reach the forecast API
    pub fn validate(&self) -> Result<()> {
        let key = self.forecast.api_key.trim();
        if key.is_empty() {
            return Err(SkyglanceError::Config(
                "forecast.api_key is empty - set it or export the referenced variable".into(),
            ));
        }
        if key.starts_with("${") {
            return Err(SkyglanceError::Config(format!(
                "forecast.api_key references an unset environment variable: {}",
                key
            )));
        }
        if self.http.timeout_secs == 0 {
            return Err(SkyglanceError::Config(
                "http.timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("skyglance").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        Self::default_config_path()
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

    /// Default path for writing new config files (~/.config/skyglance/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SkyglanceError::Config("Cannot determine config directory".into()))?
            .join("skyglance");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to `config_override`,
    /// or to the default path when none is given.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive(config_override: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up skyglance!");
        println!();

        println!("Forecast API (RapidAPI open-weather13)");
        let api_key: String = Password::new()
            .with_prompt("  RapidAPI key (or ${VAR} to read from the environment)")
            .interact()
            .map_err(|e| SkyglanceError::Config(format!("Input error: {}", e)))?;

        let units_choice = Select::new()
            .with_prompt("  Units")
            .items(&["metric", "imperial"])
            .default(0)
            .interact()
            .map_err(|e| SkyglanceError::Config(format!("Input error: {}", e)))?;
        let units = if units_choice == 1 {
            Units::Imperial
        } else {
            Units::Metric
        };

        println!();

        // --- Location (optional) ---
        println!("Location (leave city blank to detect by IP address)");
        let city: String = Input::new()
            .with_prompt("  City")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| SkyglanceError::Config(format!("Input error: {}", e)))?;

        let location = if city.is_empty() {
            None
        } else {
            let latitude: f64 = Input::new()
                .with_prompt("  Latitude")
                .interact_text()
                .map_err(|e| SkyglanceError::Config(format!("Input error: {}", e)))?;

            let longitude: f64 = Input::new()
                .with_prompt("  Longitude")
                .interact_text()
                .map_err(|e| SkyglanceError::Config(format!("Input error: {}", e)))?;

            Some(GeoLocation {
                latitude,
                longitude,
                city,
            })
        };

        println!();

        let config = Config {
            forecast: ForecastApiConfig {
                api_key,
                host: default_forecast_host(),
                base_url: default_forecast_base_url(),
                units,
            },
            geolocation: GeoLocationConfig::default(),
            location,
            http: HttpConfig::default(),
        };

        let config_path = match config_override {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        // Re-read so ${VAR} keys resolve the same way as on a normal start
        let config = Self::load(Some(config_path.clone()))?;
        Ok((config, config_path))
    }

    /// Write this config as commented YAML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| SkyglanceError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# skyglance configuration\n# Generated by `skyglance init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };

        let mut result = content.to_string();
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

impl Default for Config {
    fn default() -> Self {
        Self {
            forecast: ForecastApiConfig {
                api_key: String::new(),
                host: default_forecast_host(),
                base_url: default_forecast_base_url(),
                units: Units::Metric,
            },
            geolocation: GeoLocationConfig::default(),
            location: None,
            http: HttpConfig::default(),
        }
    }
}

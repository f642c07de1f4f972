use mealprefs::Seed;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    CommandLine,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
            ConfigSource::CommandLine => write!(f, "command line"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Who the preferences belong to, shown in the header
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResidentConfig {
    pub name: Option<String>,
    pub room: Option<String>,
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// JSON file holding the preferences document
    pub data_file: ConfigValue<PathBuf>,
    /// Document to start from when the data file doesn't exist
    pub seed: ConfigValue<Seed>,
    /// How long shell notifications stay visible
    pub notification_ms: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub resident: ResidentConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_file: Option<PathBuf>,
    seed: Option<Seed>,
    notification_ms: Option<u64>,
    resident: Option<ResidentConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_file = ConfigValue::new(
            Self::default_data_dir().join("preferences.json"),
            ConfigSource::Default,
        );
        let mut seed = ConfigValue::new(Seed::default(), ConfigSource::Default);
        let mut notification_ms = ConfigValue::new(2000, ConfigSource::Default);
        let mut config_file = None;
        let mut resident = ResidentConfig::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(file) = file_config.data_file {
                // Resolve relative paths against config file's directory
                let resolved = if file.is_relative() {
                    path.parent().map(|p| p.join(&file)).unwrap_or(file)
                } else {
                    file
                };
                data_file = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(s) = file_config.seed {
                seed = ConfigValue::new(s, ConfigSource::File);
            }
            if let Some(ms) = file_config.notification_ms {
                notification_ms = ConfigValue::new(ms, ConfigSource::File);
            }
            if let Some(r) = file_config.resident {
                resident = r;
            }
        }

        // Apply environment variable overrides
        if let Ok(file) = std::env::var("MEALPREFS_DATA_FILE") {
            data_file = ConfigValue::new(PathBuf::from(file), ConfigSource::Environment);
        }
        if let Ok(s) = std::env::var("MEALPREFS_SEED") {
            let parsed = s
                .parse::<Seed>()
                .map_err(|e| ConfigError::InvalidValue("MEALPREFS_SEED", e))?;
            seed = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(ms) = std::env::var("MEALPREFS_NOTIFICATION_MS") {
            let parsed = ms.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "MEALPREFS_NOTIFICATION_MS",
                    format!("'{}' is not a number of milliseconds", ms),
                )
            })?;
            notification_ms = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(name) = std::env::var("MEALPREFS_RESIDENT_NAME") {
            resident.name = Some(name);
        }
        if let Ok(room) = std::env::var("MEALPREFS_ROOM") {
            resident.room = Some(room);
        }

        Ok(Self {
            data_file,
            seed,
            notification_ms,
            config_file,
            resident,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/mealprefs/
    /// - macOS: ~/Library/Application Support/mealprefs/
    /// - Windows: %APPDATA%/mealprefs/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mealprefs")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/mealprefs/
    /// - macOS: ~/Library/Application Support/mealprefs/
    /// - Windows: %APPDATA%/mealprefs/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mealprefs")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(var, e) => {
                write!(f, "Invalid value for {}: {}", var, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

use crate::error::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use url::Url;
use zai_client::DEFAULT_BASE_URL;

pub const DEFAULT_MODEL: &str = "glm-4.6";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Fallbacks applied when a tool invocation leaves a field unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDefaults {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Resolved server configuration, built once at startup.
#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub base_url: Url,
    pub defaults: ModelDefaults,
}

/// Optional TOML file layout:
///
/// ```toml
/// [zai]
/// api_key = "..."
/// base_url = "https://api.z.ai/api/paas/v4"
/// model = "glm-4.6"
/// max_tokens = 4096
/// temperature = 0.7
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub zai: ConfigOverrides,
}

/// One layer of optional settings. CLI flags and environment variables
/// form one layer, the config file another.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl ConfigOverrides {
    /// Fill unset fields from `fallback`.
    fn or(self, fallback: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.or(fallback.api_key),
            base_url: self.base_url.or(fallback.base_url),
            model: self.model.or(fallback.model),
            max_tokens: self.max_tokens.or(fallback.max_tokens),
            temperature: self.temperature.or(fallback.temperature),
        }
    }
}

impl FileConfig {
    /// Load an explicitly named config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Reading configuration file");
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ServerConfig {
    /// Resolve configuration. Precedence: `overrides` > config file > defaults.
    pub fn load(
        config_path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::from_layers(overrides, file)
    }

    pub fn from_layers(overrides: ConfigOverrides, file: FileConfig) -> Result<Self, ConfigError> {
        let merged = overrides.or(file.zai);

        let api_key = merged
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = merged
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw_url.clone(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: raw_url,
                reason: format!("unsupported scheme {}", base_url.scheme()),
            });
        }

        let model = merged.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        let max_tokens = merged.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens);
        }

        let temperature = merged.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ConfigError::InvalidTemperature(temperature));
        }

        Ok(Self {
            api_key,
            base_url,
            defaults: ModelDefaults {
                model,
                max_tokens,
                temperature,
            },
        })
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("defaults", &self.defaults)
            .finish()
    }
}

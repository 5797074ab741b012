use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const API_KEY_ENV: &str = "FXCONV_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRateProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ExchangeRateProviderConfig {
    fn default() -> Self {
        ExchangeRateProviderConfig {
            base_url: "https://v6.exchangerate-api.com/v6".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DirectoryProviderConfig {
    pub base_url: String,
}

impl Default for DirectoryProviderConfig {
    fn default() -> Self {
        DirectoryProviderConfig {
            base_url: "https://restcountries.com".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub exchange_rate: ExchangeRateProviderConfig,
    #[serde(default)]
    pub directory: DirectoryProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DirectorySource {
    /// Built-in table, in its own order.
    #[default]
    Static,
    /// REST Countries API, sorted by code.
    Api,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub source: DirectorySource,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    pub data_path: Option<String>,
}

impl AppConfig {
    /// Loads the default config file, or defaults when there is none yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "fxconv", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// The rate API key, preferring the `FXCONV_API_KEY` environment variable.
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.providers.exchange_rate.api_key.clone())
            .filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  exchange_rate:
    base_url: "http://example.com/rates"
    api_key: "secret"
  directory:
    base_url: "http://example.com/countries"
directory:
  source: api
data_path: "/tmp/fxconv"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "http://example.com/rates"
        );
        assert_eq!(
            config.providers.exchange_rate.api_key.as_deref(),
            Some("secret")
        );
        assert_eq!(
            config.providers.directory.base_url,
            "http://example.com/countries"
        );
        assert_eq!(config.directory.source, DirectorySource::Api);
        assert_eq!(
            config.default_data_path().unwrap(),
            PathBuf::from("/tmp/fxconv")
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(
            config.providers.exchange_rate.base_url,
            "https://v6.exchangerate-api.com/v6"
        );
        assert!(config.providers.exchange_rate.api_key.is_none());
        assert_eq!(
            config.providers.directory.base_url,
            "https://restcountries.com"
        );
        assert_eq!(config.directory.source, DirectorySource::Static);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_env_api_key_takes_precedence() {
        let mut config = AppConfig::default();
        config.providers.exchange_rate.api_key = Some("from-file".to_string());

        assert_eq!(
            config.resolve_api_key(Some("from-env".to_string())),
            Some("from-env".to_string())
        );
        assert_eq!(
            config.resolve_api_key(Some("  ".to_string())),
            Some("from-file".to_string())
        );
        assert_eq!(config.resolve_api_key(None), Some("from-file".to_string()));

        config.providers.exchange_rate.api_key = Some(String::new());
        assert_eq!(config.resolve_api_key(None), None);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("absent.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}

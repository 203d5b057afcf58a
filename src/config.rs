use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable that overrides `[api] base_url`
pub const BASE_URL_ENV: &str = "LISTINGS_API_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub home: HomeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Buy and rent pages
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_per_page")]
    pub per_page: u32,
}

/// Home page and the similar-listings panel
#[derive(Debug, Clone, Deserialize)]
pub struct HomeConfig {
    #[serde(default = "default_home_per_page")]
    pub per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: default_catalog_per_page(),
        }
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            per_page: default_home_per_page(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config TOML")
    }

    /// Load `path` if it exists, defaults otherwise, then apply env overrides
    pub fn resolve<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.as_ref().exists() => Self::load(path)?,
            _ => Self::default(),
        };
        config.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
        Ok(config)
    }

    fn apply_base_url_override(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.api.base_url = url;
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("realty-listings/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_catalog_per_page() -> u32 {
    50
}

fn default_home_per_page() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.catalog.per_page, 50);
        assert_eq!(config.home.per_page, 12);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://api.example.com\"\ntimeout_secs = 5\n\n[catalog]\nper_page = 20"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.catalog.per_page, 20);
        assert_eq!(config.home.per_page, 12);
    }

    #[test]
    fn test_missing_file_resolves_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::resolve(Some(dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.catalog.per_page, 50);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("[api\nbase_url = 1").is_err());
    }

    #[test]
    fn test_base_url_override() {
        let mut config = Config::default();
        config.apply_base_url_override(Some("  ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:8000/api");

        config.apply_base_url_override(Some("https://override".to_string()));
        assert_eq!(config.api.base_url, "https://override");
    }
}

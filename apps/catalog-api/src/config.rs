use core_config::{app_info, env_optional, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use std::path::PathBuf;

// Re-export Environment for use in other modules
pub use core_config::Environment;

pub const DEFAULT_CATALOG_DATA_PATH: &str = "data/catalog.json";

/// Where the catalog snapshot and its public assets live
#[derive(Clone, Debug)]
pub struct CatalogConfig {
    /// JSON snapshot read at start-up, relative to the working directory
    pub data_path: PathBuf,
    /// Base URL of thumbnails; `None` means `{public base url}/static`
    pub assets_url: Option<String>,
}

impl FromEnv for CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let data_path = env_optional("CATALOG_DATA_PATH")
            .unwrap_or_else(|| DEFAULT_CATALOG_DATA_PATH.to_string())
            .into();

        let assets_url = env_optional("ASSETS_URL");
        if let Some(ref url) = assets_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ParseError {
                    key: "ASSETS_URL".to_string(),
                    details: format!("'{}' must start with http:// or https://", url),
                });
            }
        }

        Ok(Self {
            data_path,
            assets_url,
        })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let catalog = CatalogConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            server,
            catalog,
            environment,
        })
    }

    /// Origin of every absolute link in responses.
    pub fn public_base_url(&self) -> String {
        self.server.public_base_url()
    }

    pub fn assets_url(&self) -> String {
        match &self.catalog.assets_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("{}/static", self.public_base_url()),
        }
    }
}

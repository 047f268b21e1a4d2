use crate::{env_optional, env_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Externally visible origin used when rendering absolute URLs
    pub public_url: Option<String>,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            public_url: None,
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Origin clients use to reach this server, without a trailing slash.
    ///
    /// Falls back to `http://localhost:{port}` when `PUBLIC_BASE_URL` is unset.
    pub fn public_base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", self.port),
        }
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    /// - PUBLIC_BASE_URL: optional, see [`ServerConfig::public_base_url`]
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_or_default("PORT", "8080").parse().map_err(|e| {
            ConfigError::ParseError {
                key: "PORT".to_string(),
                details: format!("{}", e),
            }
        })?;

        let public_url = env_optional("PUBLIC_BASE_URL");
        if let Some(ref url) = public_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ParseError {
                    key: "PUBLIC_BASE_URL".to_string(),
                    details: format!("'{}' must start with http:// or https://", url),
                });
            }
        }

        Ok(Self {
            host,
            port,
            public_url,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), 8080)
    }
}

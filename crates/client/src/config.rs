//! Client configuration.

use thiserror::Error;
use url::Url;

/// Upstream products endpoint.
pub const DEFAULT_PRODUCTS_URL: &str = "https://fakestoreapi.com/products/";

/// Environment variable overriding [`DEFAULT_PRODUCTS_URL`].
pub const PRODUCTS_URL_ENV: &str = "STOREFRONT_API_URL";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid products URL {value:?}: {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Where the listing loads its catalog from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    products_url: Url,
}

impl ClientConfig {
    pub fn new(products_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(products_url).map_err(|e| ConfigError::InvalidUrl {
            value: products_url.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self { products_url: url }),
            other => Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Read the endpoint from `STOREFRONT_API_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`], with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match lookup(PRODUCTS_URL_ENV) {
            Some(value) if !value.trim().is_empty() => Self::new(value.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn products_url(&self) -> &Url {
        &self.products_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            products_url: Url::parse(DEFAULT_PRODUCTS_URL).expect("default products URL is valid"),
        }
    }
}

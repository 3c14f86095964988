//! Runtime configuration of the API client.

use std::time::Duration;
use url::Url;

/// Base URL baked in at build time, e.g. `FEICOM_API_BASE_URL=https://fcom.example.org trunk build`.
const BUILD_BASE_URL: Option<&str> = option_env!("FEICOM_API_BASE_URL");

/// Requests taking longer than this are aborted (where the HTTP backend supports it).
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot read the browser location")]
    NoLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let mut url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        // `Url::join` replaces the last segment unless the path ends with a slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(Self {
            base_url: url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Uses the build-time base URL, falling back to the origin the app was served from.
    pub fn from_env() -> Result<Self, ConfigError> {
        match BUILD_BASE_URL.filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Self::new(&browser_origin()?),
        }
    }
}

fn browser_origin() -> Result<String, ConfigError> {
    gloo::utils::window()
        .location()
        .origin()
        .map_err(|_| ConfigError::NoLocation)
}

//! The monitored target.

use reqwest::Url;
use thiserror::Error;

/// Errors raised when a target URL cannot be monitored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("invalid URL '{url}': {message}")]
    Parse { url: String, message: String },

    #[error("unsupported scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("URL '{0}' has no host")]
    MissingHost(String),
}

/// A website under watch.
///
/// Keeps the URL exactly as configured, since alert messages quote it
/// verbatim, next to the parsed form used for requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    raw: String,
    url: Url,
}

impl Target {
    /// Parse and validate a target URL.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw).map_err(|e| TargetError::Parse {
            url: raw.to_string(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(TargetError::UnsupportedScheme(other.to_string())),
        }

        if url.host_str().map_or(true, str::is_empty) {
            return Err(TargetError::MissingHost(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            url,
        })
    }

    /// The URL as it was configured.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host name without port.
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }

    /// Port for the TLS handshake: the explicit one, or the scheme default.
    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(443)
    }

    /// Whether certificate validation applies to this target.
    pub fn is_https(&self) -> bool {
        self.url.scheme() == "https"
    }

    /// Deduplication alias for incident platforms.
    ///
    /// The URL authority (host, plus `:port` when one is given explicitly)
    /// with every `.` replaced by `-`. Path and query never contribute.
    pub fn host_alias(&self) -> String {
        let authority = match self.url.port() {
            Some(port) => format!("{}:{}", self.host(), port),
            None => self.host().to_string(),
        };
        authority.replace('.', "-")
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

//! Client construction parameters.
//!
//! Window length and capacity are required; everything else has a
//! documented default. There is no config file or environment lookup:
//! all parameters are passed at construction.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Production registration endpoint for document submissions.
pub const DEFAULT_ENDPOINT: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Construction parameters for [`crate::Client`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Length of the admission window. Capacity resets once per window.
    pub window: Duration,
    /// Maximum number of submissions admitted per window.
    pub capacity: u32,
    /// Registration endpoint URL. Defaults to [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
    /// End-to-end timeout for a single outbound request.
    pub request_timeout: Duration,
    /// Timeout for establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the two required parameters and defaults for
    /// the transport settings.
    pub fn new(window: Duration, capacity: u32) -> Self {
        Self {
            window,
            capacity,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the registration endpoint (mainly for testing).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Override the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Validate all parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.window.is_zero() {
            return Err(ConfigError::ZeroWindow);
        }
        self.validated_endpoint().map(|_| ())
    }

    /// Parse and validate the endpoint URL.
    pub(crate) fn validated_endpoint(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(ConfigError::InvalidEndpoint(format!(
                "unsupported scheme '{}': only http/https allowed",
                scheme
            ))),
        }
    }
}

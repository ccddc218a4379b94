use std::time::Duration;

/// Base URL used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout applied when the caller does not choose one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Trim whitespace and trailing slashes so endpoint paths can be appended directly
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Connection settings shared by the chat and appointment clients
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    /// `None` leaves the transport without a deadline
    pub timeout: Option<Duration>,
    /// Dump request and response bodies to stderr
    pub verbose: bool,
}

impl ClientOptions {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: Some(DEFAULT_TIMEOUT),
            verbose: false,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

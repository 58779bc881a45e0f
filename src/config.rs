// src/config.rs
use std::time::Duration;

/// Address used when nothing is configured, matching the local development
/// server.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the search service, resolved once at startup and
/// handed to the client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        // Endpoint paths start with '/', so the base must not end with one.
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolve the base address from the environment, falling back to the
    /// local development server.
    pub fn from_env() -> Self {
        let base_url = std::env::var("JOBFUNNEL_API_BASE")
            .or_else(|_| std::env::var("API_BASE"))
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = ApiConfig::new("https://jobs.example.com/");
        assert_eq!(config.base_url, "https://jobs.example.com");

        let config = ApiConfig::new("https://jobs.example.com//");
        assert_eq!(config.base_url, "https://jobs.example.com");
    }

    #[test]
    fn test_with_timeout_overrides_default() {
        let config = ApiConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}

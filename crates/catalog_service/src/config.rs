//! Service configuration.

use std::time::Duration;

/// Configuration for the catalog service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound on each request (`None` = caller's deadline only).
    pub request_timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Sets the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Removes the request timeout.
    pub fn without_request_timeout(mut self) -> Self {
        self.request_timeout = None;
        self
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn config_builder() {
        let config = ServiceConfig::new().with_request_timeout(Duration::from_millis(250));
        assert_eq!(config.request_timeout, Some(Duration::from_millis(250)));
        assert!(config.without_request_timeout().request_timeout.is_none());
    }
}

use std::path::PathBuf;

/// Default server URL
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    server_url: String,
    token_slot_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let server_url = std::env::var("MINDMATE_API_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self {
            server_url,
            token_slot_path: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration pointing at a specific server
    pub fn with_server_url(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            token_slot_path: None,
        }
    }

    /// Override where the durable credential slot lives (mainly for tests)
    pub fn set_token_slot_path(&mut self, path: PathBuf) {
        self.token_slot_path = Some(path);
    }

    /// Path for the durable credential slot, if one was configured
    pub fn token_slot_path(&self) -> Option<&PathBuf> {
        self.token_slot_path.as_ref()
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_server_url() {
        let config = Config::with_server_url("http://localhost:9999");
        assert_eq!(config.server_url(), "http://localhost:9999");
    }

    #[test]
    fn test_api_url() {
        let config = Config::with_server_url("http://localhost:9999");
        assert_eq!(
            config.api_url("/api/users/diary"),
            "http://localhost:9999/api/users/diary"
        );
    }

    #[test]
    fn test_token_slot_path_default_none() {
        let config = Config::with_server_url("http://localhost:9999");
        assert!(config.token_slot_path().is_none());
    }
}

//! Configuration from environment variables
//!
//! Ansible invokes inventory scripts with nothing but `--list`/`--host`,
//! so everything else comes from the environment. No config file.

/// Default API endpoint when `METAL_ENROLLMENT_URL` is unset.
const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Runtime configuration for the inventory CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Metal Enrollment API
    pub api_url: String,
    /// Bearer token sent on every request when set
    pub token: Option<String>,
}

impl Config {
    /// Read `METAL_ENROLLMENT_URL` and `METAL_ENROLLMENT_TOKEN`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("METAL_ENROLLMENT_URL").ok(),
            std::env::var("METAL_ENROLLMENT_TOKEN").ok(),
        )
    }

    fn from_vars(url: Option<String>, token: Option<String>) -> Self {
        Self {
            api_url: url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: token.filter(|token| !token.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.api_url, "http://localhost:8080");
        assert!(config.token.is_none());
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_vars(
            Some("https://enroll.example.com".to_string()),
            Some("tok".to_string()),
        );
        assert_eq!(config.api_url, "https://enroll.example.com");
        assert_eq!(config.token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_empty_token_means_no_auth() {
        let config = Config::from_vars(None, Some(String::new()));
        assert!(config.token.is_none());
    }
}

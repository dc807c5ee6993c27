//! Backend connection settings.

use std::env;

const URL_VAR: &str = "BEAUTYBOOK_BACKEND_URL";
const ANON_KEY_VAR: &str = "BEAUTYBOOK_ANON_KEY";

/// Configuration for the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Project base URL (default: http://localhost:54321)
    pub url: String,
    /// Public anonymous API key sent with every request
    pub anon_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
        }
    }
}

impl BackendConfig {
    /// Read settings from the environment.
    ///
    /// Runtime variables win; the WASM build has none, so the values captured
    /// at compile time are used next, then the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: lookup(URL_VAR, option_env!("BEAUTYBOOK_BACKEND_URL")).unwrap_or(defaults.url),
            anon_key: lookup(ANON_KEY_VAR, option_env!("BEAUTYBOOK_ANON_KEY"))
                .unwrap_or(defaults.anon_key),
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        !self.anon_key.trim().is_empty()
    }

    /// Absolute URL for an endpoint path such as `/auth/v1/user`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}

fn lookup(name: &str, build_time: Option<&'static str>) -> Option<String> {
    env::var(name)
        .ok()
        .or_else(|| build_time.map(str::to_string))
        .filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_default() {
        let config = BackendConfig::default();
        assert_eq!(config.url, "http://localhost:54321");
        assert!(config.anon_key.is_empty());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_backend_config_custom() {
        let config = BackendConfig {
            url: "https://studio.example.co/".to_string(),
            anon_key: "public-anon-key".to_string(),
        };
        assert!(config.is_configured());
        assert_eq!(
            config.endpoint("/rest/v1/services"),
            "https://studio.example.co/rest/v1/services"
        );
    }

    #[test]
    fn test_lookup_prefers_build_time_over_default() {
        let value = lookup("BEAUTYBOOK_TEST_UNSET_VARIABLE", Some("https://built.example"));
        assert_eq!(value.as_deref(), Some("https://built.example"));
        assert_eq!(lookup("BEAUTYBOOK_TEST_UNSET_VARIABLE", Some("  ")), None);
        assert_eq!(lookup("BEAUTYBOOK_TEST_UNSET_VARIABLE", None), None);
    }
}

//! Application configuration

use std::env;

use api_wrapper::WrapOptions;

/// Host configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Strict conversion for routes that do not set it themselves
    pub force_match: bool,

    /// Treat empty/zero/false query values as absent
    pub falsy_is_missing: bool,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("API_WRAPPER_BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: env::var("API_WRAPPER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),

            force_match: env::var("API_WRAPPER_FORCE_MATCH")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.force_match),

            falsy_is_missing: env::var("API_WRAPPER_FALSY_IS_MISSING")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.falsy_is_missing),
        }
    }

    /// Baseline options every route starts from
    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::new()
            .force_match(self.force_match)
            .falsy_is_missing(self.falsy_is_missing)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            force_match: false,
            falsy_is_missing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_options_follow_config() {
        let config = AppConfig {
            force_match: true,
            ..AppConfig::default()
        };
        let opts = config.wrap_options();
        assert!(opts.force_match);
        assert!(!opts.falsy_is_missing);
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    }
}

//! Frontend configuration module
//!
//! The wasm bundle has no process environment, so the configuration inputs
//! are captured when the bundle is compiled.

use shared::config::client::{ClientConfig, ConfigError, ConfigSource};

/// Configuration inputs captured at build time.
#[must_use]
pub fn build_source() -> ConfigSource {
    ConfigSource {
        environment: option_env!("LETSQUIZ_ENV").map(str::to_string),
        server_override: option_env!("LETSQUIZ_SERVER").map(str::to_string),
        public_path: option_env!("LETSQUIZ_PUBLIC_PATH").map(str::to_string),
    }
}

/// Resolve the client configuration baked into this build.
///
/// # Errors
/// Returns a [`ConfigError`] when the captured base URL is unusable.
pub fn build_config() -> Result<ClientConfig, ConfigError> {
    ClientConfig::resolve(&build_source())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_config_resolves() {
        let config = build_config().unwrap();
        assert!(!config.base_url.is_empty());
        assert!(!config.base_url.ends_with('/') || config.base_url == "/");
    }

    #[test]
    fn build_source_matches_compile_time_env() {
        let source = build_source();
        assert_eq!(source.environment.as_deref(), option_env!("LETSQUIZ_ENV"));
        assert_eq!(source.server_override.as_deref(), option_env!("LETSQUIZ_SERVER"));
    }
}

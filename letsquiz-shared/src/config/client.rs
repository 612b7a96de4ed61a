use std::{fmt, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Environment variable selecting the runtime environment.
pub const ENV_VAR: &str = "LETSQUIZ_ENV";
/// Environment variable overriding the API base URL.
pub const SERVER_VAR: &str = "LETSQUIZ_SERVER";
/// Environment variable holding the public path of the deployed bundle.
pub const PUBLIC_PATH_VAR: &str = "LETSQUIZ_PUBLIC_PATH";

/// Base URL used during local development.
pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:3000/api";
/// Base URL of the hosted backend.
pub const PRODUCTION_BASE_URL: &str = "https://backend-chih.onrender.com/api";
/// Fixed timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised while resolving client configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The resolved base URL is neither absolute nor rooted at `/`.
    #[error("Invalid API base URL `{value}`: {reason}")]
    InvalidBaseUrl { value: String, reason: String },
}

/// Runtime environment the client was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Environment implied by the build profile.
    #[must_use]
    pub fn from_build_profile() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = std::convert::Infallible;

    /// Only `development` selects development; anything else is production.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("development") {
            Ok(Self::Development)
        } else {
            Ok(Self::Production)
        }
    }
}

/// Raw configuration inputs before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSource {
    pub environment: Option<String>,
    pub server_override: Option<String>,
    pub public_path: Option<String>,
}

impl ConfigSource {
    /// Collect inputs through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            environment: lookup(ENV_VAR),
            server_override: lookup(SERVER_VAR),
            public_path: lookup(PUBLIC_PATH_VAR),
        }
    }

    /// Collect inputs from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

/// Resolved HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub environment: Environment,
    /// API base URL without a trailing slash. Either absolute or rooted at `/`.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Resolve the configuration from raw inputs.
    ///
    /// Precedence: a non-empty server override wins in every environment;
    /// development then falls back to the local server; production uses the
    /// public path when one is set and the hosted backend otherwise.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] when the resolved URL is not
    /// an absolute http(s) URL or a path starting with `/`.
    pub fn resolve(source: &ConfigSource) -> Result<Self, ConfigError> {
        let environment = source
            .environment
            .as_deref()
            .and_then(non_empty)
            .map_or_else(Environment::from_build_profile, |value| {
                value.parse().unwrap_or_default()
            });

        let base_url = if let Some(server) = source.server_override.as_deref().and_then(non_empty)
        {
            server.to_string()
        } else {
            match environment {
                Environment::Development => DEVELOPMENT_BASE_URL.to_string(),
                Environment::Production => source
                    .public_path
                    .as_deref()
                    .and_then(non_empty)
                    .map_or_else(
                        || PRODUCTION_BASE_URL.to_string(),
                        |public_path| format!("{}/api", public_path.trim_end_matches('/')),
                    ),
            }
        };

        let base_url = validate_base_url(&base_url)?;
        debug!(%environment, %base_url, "resolved client configuration");

        Ok(Self {
            environment,
            base_url,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a configuration pointing at an explicit base URL.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBaseUrl`] for unusable URLs.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Self::resolve(&ConfigSource {
            environment: None,
            server_override: Some(base_url.to_string()),
            public_path: None,
        })
    }

    /// Whether the base URL must be resolved against the page origin.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.base_url.starts_with('/')
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn validate_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim_end_matches('/');
    if value.starts_with('/') {
        // `/` alone must stay rooted.
        return Ok(if trimmed.is_empty() { "/" } else { trimmed }.to_string());
    }

    let parsed = Url::parse(value).map_err(|err| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: format!("unsupported scheme `{}`", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

use async_trait::async_trait;
use log::{debug, warn};
use once_cell::unsync::OnceCell;
use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use shared::config::client::{ClientConfig, ConfigError};
use shared::models::{ApiResponse, LoginRequest, User};
use std::time::Duration;
use thiserror::Error;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ALLOW_CREDENTIALS_HEADER: &str = "access-control-allow-credentials";

/// Identity endpoint used to sign in.
pub const LOGIN_PATH: &str = "/users/login";
/// Identity endpoint returning the user bound to the session cookie.
pub const CURRENT_USER_PATH: &str = "/users";
/// Identity endpoint terminating the server-side session.
pub const LOGOUT_PATH: &str = "/users/logout";

thread_local! {
    static SHARED_CLIENT: OnceCell<QuizApiClient> = OnceCell::new();
}

/// Failures surfaced by [`QuizApiClient`] calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response arrived within the configured timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Network failure before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body lacks the success marker.
    #[error("{message}")]
    Rejected { message: String },

    /// The body could not be decoded or is missing required data.
    #[error("Malformed response: {details}")]
    Malformed { details: String },

    /// The request payload could not be encoded.
    #[error("Invalid request payload: {details}")]
    InvalidPayload { details: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Build an application-level rejection.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Whether the failure happened below the application layer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport(_))
    }

    /// Whether the backend explicitly refused the session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}

/// The identity endpoints the session store depends on.
#[async_trait(?Send)]
pub trait IdentityApi {
    /// Post credentials to the login endpoint.
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<User>, ApiError>;

    /// Fetch the user bound to the current session cookie.
    async fn current_user(&self) -> Result<ApiResponse<User>, ApiError>;

    /// Ask the backend to end the current session.
    async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiError>;
}

/// HTTP client for the LetsQuiz backend.
///
/// Every request carries JSON headers and the session cookie, and is bounded
/// by the configured timeout. Failed calls are never retried.
#[derive(Clone, Debug)]
pub struct QuizApiClient {
    base_url: String,
    timeout: Duration,
    client: Client,
}

impl QuizApiClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    /// Fails when the base URL cannot be made absolute or the HTTP client
    /// cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = absolute_base_url(config)?;
        let client = build_http_client(config.timeout)?;
        debug!("API client targeting {base_url}");
        Ok(Self {
            base_url,
            timeout: config.timeout,
            client,
        })
    }

    /// Client built from the configuration baked into this bundle.
    ///
    /// # Errors
    /// Fails when the build configuration is unusable.
    pub fn shared() -> Result<Self, ApiError> {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_try_init(|| Self::new(&crate::config::build_config()?))
                .cloned()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.api_url(path))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ALLOW_CREDENTIALS_HEADER, "true");
        include_credentials(builder)
    }

    fn with_json<B>(builder: RequestBuilder, body: &B) -> Result<RequestBuilder, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body).map_err(|err| ApiError::InvalidPayload {
            details: err.to_string(),
        })?;
        Ok(builder.body(payload))
    }

    /// `GET` a path relative to the base URL.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    /// `POST` a JSON payload.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = Self::with_json(self.request(Method::POST, path), body)?;
        self.send(builder).await
    }

    /// `POST` without a body.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path)).await
    }

    /// `PUT` a JSON payload.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = Self::with_json(self.request(Method::PUT, path), body)?;
        self.send(builder).await
    }

    /// `PATCH` a JSON payload.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = Self::with_json(self.request(Method::PATCH, path), body)?;
        self.send(builder).await
    }

    /// `DELETE` a path.
    ///
    /// # Errors
    /// See [`ApiError`].
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.execute(builder).await?;
        self.decode(response).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        builder.send().await.map_err(|err| self.transport_error(err))
    }

    #[cfg(target_arch = "wasm32")]
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        use futures::future::{Either, select};
        use gloo_timers::future::TimeoutFuture;

        let millis = u32::try_from(self.timeout.as_millis()).unwrap_or(u32::MAX);
        let send = Box::pin(builder.send());
        let timer = Box::pin(TimeoutFuture::new(millis));
        match select(send, timer).await {
            Either::Left((result, _)) => result.map_err(|err| self.transport_error(err)),
            Either::Right(((), _)) => Err(ApiError::Timeout {
                timeout: self.timeout,
            }),
        }
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
            warn!("API call failed with {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Malformed {
            details: err.to_string(),
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout: self.timeout,
            }
        } else {
            ApiError::Transport(err)
        }
    }
}

#[async_trait(?Send)]
impl IdentityApi for QuizApiClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<ApiResponse<User>, ApiError> {
        self.post(LOGIN_PATH, credentials).await
    }

    async fn current_user(&self) -> Result<ApiResponse<User>, ApiError> {
        self.get(CURRENT_USER_PATH).await
    }

    async fn logout(&self) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        self.post_empty(LOGOUT_PATH).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http_client(timeout: Duration) -> Result<Client, ApiError> {
    Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .build()
        .map_err(ApiError::Transport)
}

#[cfg(target_arch = "wasm32")]
fn build_http_client(_timeout: Duration) -> Result<Client, ApiError> {
    Client::builder().build().map_err(ApiError::Transport)
}

#[cfg(not(target_arch = "wasm32"))]
fn include_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder
}

#[cfg(target_arch = "wasm32")]
fn include_credentials(builder: RequestBuilder) -> RequestBuilder {
    builder.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn absolute_base_url(config: &ClientConfig) -> Result<String, ApiError> {
    if config.is_relative() {
        return Err(ConfigError::InvalidBaseUrl {
            value: config.base_url.clone(),
            reason: "a relative base URL needs a browser origin".to_string(),
        }
        .into());
    }
    Ok(config.base_url.clone())
}

#[cfg(target_arch = "wasm32")]
fn absolute_base_url(config: &ClientConfig) -> Result<String, ApiError> {
    if !config.is_relative() {
        return Ok(config.base_url.clone());
    }
    let origin = web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .ok_or_else(|| ConfigError::InvalidBaseUrl {
            value: config.base_url.clone(),
            reason: "page origin is unavailable".to_string(),
        })?;
    Ok(format!("{origin}{}", config.base_url.trim_end_matches('/')))
}

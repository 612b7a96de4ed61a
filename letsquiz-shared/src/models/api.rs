use serde::{Deserialize, Serialize};

/// Value of `message` the backend uses to mark a successful call.
pub const SUCCESS_MESSAGE: &str = "success";

/// Envelope wrapping every LetsQuiz API response.
///
/// Transport success says nothing about the outcome; callers check
/// [`ApiResponse::is_success`] before trusting `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Success marker, `"success"` when the call succeeded.
    #[serde(default)]
    pub message: String,

    /// Payload of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human readable failure reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful envelope carrying `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed envelope carrying an error reason.
    #[must_use]
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    /// Whether the body carries the success marker.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.message == SUCCESS_MESSAGE
    }
}

/// Credentials posted to `/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{User, UserRole};
    use serde_json::json;

    #[test]
    fn success_envelope_with_user() {
        let body: ApiResponse<User> =
            serde_json::from_value(json!({ "message": "success", "data": { "role": "teacher" } }))
                .unwrap();

        assert!(body.is_success());
        assert_eq!(body.data.unwrap().role, UserRole::Teacher);
        assert!(body.error.is_none());
    }

    #[test]
    fn failure_envelope_keeps_error() {
        let body: ApiResponse<User> =
            serde_json::from_value(json!({ "message": "fail", "error": "bad credentials" }))
                .unwrap();

        assert!(!body.is_success());
        assert!(body.data.is_none());
        assert_eq!(body.error.as_deref(), Some("bad credentials"));
    }

    #[test]
    fn bare_message_envelope() {
        let body: ApiResponse<serde_json::Value> =
            serde_json::from_value(json!({ "message": "success" })).unwrap();
        assert!(body.is_success());
        assert!(body.data.is_none());
    }

    #[test]
    fn missing_message_is_not_success() {
        let body: ApiResponse<serde_json::Value> = serde_json::from_value(json!({})).unwrap();
        assert!(!body.is_success());
    }

    #[test]
    fn constructors_serialize_like_backend_bodies() {
        let ok = ApiResponse::success(User::with_role("student"));
        let failed: ApiResponse<User> = ApiResponse::failure("fail", "not logged in");

        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "message": "success", "data": { "role": "student" } })
        );
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({ "message": "fail", "error": "not logged in" })
        );
    }

    #[test]
    fn login_request_wire_shape() {
        let request = LoginRequest {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "email": "a@b.com", "password": "pw" })
        );
    }
}

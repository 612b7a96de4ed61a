use serde::{Deserialize, Serialize};
use std::fmt;

/// Role assigned to a quiz account.
///
/// Roles the client does not know about are preserved verbatim so that
/// route role checks still compare against what the backend sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Teacher,
    Student,
    Other(String),
}

impl UserRole {
    /// Return the wire representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.as_str() {
            "teacher" => Self::Teacher,
            "student" => Self::Student,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for UserRole {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// The identity record returned by `/users` and `/users/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Backend identifier, when the backend exposes one.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name chosen at registration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Login email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role used by route guards.
    pub role: UserRole,
}

impl User {
    /// Build a user that only carries a role.
    #[must_use]
    pub fn with_role(role: impl Into<UserRole>) -> Self {
        Self {
            id: None,
            username: None,
            email: None,
            role: role.into(),
        }
    }
}

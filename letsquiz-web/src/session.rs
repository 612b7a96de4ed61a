//! Session store.
//!
//! [`SessionState`] lives in a yewdux store owned by the app root. All
//! writes go through [`SessionStore`], whose actions talk to the identity
//! endpoints and then commit the result.

use crate::api::{ApiError, IdentityApi, QuizApiClient};
use log::{error, info, warn};
use shared::models::{ApiResponse, LoginRequest, User, UserRole};
use std::fmt;
use std::rc::Rc;
use yewdux::{Context, Dispatch, Store};

const LOGIN_FAILED: &str = "Login failed";
const LOGOUT_FAILED: &str = "Logout failed";
const REFRESH_FAILED: &str = "Session refresh failed";

/// Identity of the current visitor.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct SessionState {
    user: Option<User>,
    store_updated: bool,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Derived from the user; there is no separate flag to fall out of sync.
    pub fn user_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<&UserRole> {
        self.user.as_ref().map(|user| &user.role)
    }

    /// Whether the identity has been fetched from the backend this session.
    pub fn is_store_updated(&self) -> bool {
        self.store_updated
    }
}

/// Result of refreshing the session from the backend.
///
/// The guard treats everything but `Authenticated` as logged out;
/// `Unreachable` lets the UI tell a backend outage from a real logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Authenticated,
    Anonymous,
    Unreachable,
}

/// Handle for reading and mutating the session.
pub struct SessionStore<A = QuizApiClient> {
    api: Rc<A>,
    dispatch: Dispatch<SessionState>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            dispatch: self.dispatch.clone(),
        }
    }
}

impl<A> fmt::Debug for SessionStore<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.dispatch.get())
            .finish_non_exhaustive()
    }
}

impl<A: IdentityApi> SessionStore<A> {
    pub fn new(api: A, dispatch: Dispatch<SessionState>) -> Self {
        Self {
            api: Rc::new(api),
            dispatch,
        }
    }

    /// Attach to the session held by an explicit yewdux context.
    pub fn with_context(api: A, cx: &Context) -> Self {
        Self::new(api, Dispatch::new(cx))
    }

    /// Snapshot of the current session.
    pub fn state(&self) -> Rc<SessionState> {
        self.dispatch.get()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Replace the current user. Logged-in status follows automatically.
    pub fn set_user(&self, user: Option<User>) {
        self.dispatch.reduce_mut(|state| state.user = user);
    }

    pub fn set_store_updated(&self, updated: bool) {
        self.dispatch.reduce_mut(|state| state.store_updated = updated);
    }

    /// Sign in with email and password.
    ///
    /// The user is committed before this returns. On any failure the user is
    /// cleared and the error handed back for the caller to display.
    ///
    /// # Errors
    /// [`ApiError::Rejected`] carries the backend's `error` text; transport,
    /// status and decoding failures pass through unchanged.
    pub async fn login(&self, email: &str, password: &str) -> Result<bool, ApiError> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let result = self
            .api
            .login(&credentials)
            .await
            .and_then(|body| accepted_user(body, LOGIN_FAILED));

        match result {
            Ok(user) => {
                info!("signed in as {}", user.role);
                self.set_user(Some(user));
                Ok(true)
            }
            Err(err) => {
                warn!("login failed: {err}");
                self.set_user(None);
                Err(err)
            }
        }
    }

    /// Re-read the identity bound to the session cookie.
    ///
    /// Failures clear the user instead of surfacing. The store is marked as
    /// updated however this returns.
    pub async fn update_store(&self) -> RefreshOutcome {
        let _updated = MarkUpdatedOnDrop(&self.dispatch);

        let result = self
            .api
            .current_user()
            .await
            .and_then(|body| accepted_user(body, REFRESH_FAILED));

        match result {
            Ok(user) => {
                self.set_user(Some(user));
                RefreshOutcome::Authenticated
            }
            Err(err) => {
                self.set_user(None);
                let unreachable = err.is_transport()
                    || matches!(err, ApiError::Malformed { .. })
                    || matches!(err, ApiError::Status { status, .. } if status >= 500);
                if unreachable {
                    warn!("session refresh failed: {err}");
                    RefreshOutcome::Unreachable
                } else {
                    RefreshOutcome::Anonymous
                }
            }
        }
    }

    /// End the session on the backend.
    ///
    /// # Errors
    /// Any failure is logged and returned; the local user is kept.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.api.logout().await.and_then(|body| {
            if body.is_success() {
                Ok(())
            } else {
                Err(ApiError::rejected(
                    body.error.unwrap_or_else(|| LOGOUT_FAILED.to_string()),
                ))
            }
        });

        match result {
            Ok(()) => {
                self.set_user(None);
                Ok(())
            }
            Err(err) => {
                error!("Logout error: {err}");
                Err(err)
            }
        }
    }
}

/// Sets `store_updated` when dropped, whichever way the refresh ends.
struct MarkUpdatedOnDrop<'a>(&'a Dispatch<SessionState>);

impl Drop for MarkUpdatedOnDrop<'_> {
    fn drop(&mut self) {
        self.0.reduce_mut(|state| state.store_updated = true);
    }
}

fn accepted_user(body: ApiResponse<User>, fallback: &str) -> Result<User, ApiError> {
    if !body.is_success() {
        return Err(ApiError::rejected(
            body.error.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    body.data.ok_or_else(|| ApiError::Malformed {
        details: "success response without user data".to_string(),
    })
}

//! Navigation guard.
//!
//! Runs before every navigation. The first navigation of a page load waits
//! for the session to be refreshed from the backend; afterwards decisions
//! are made from the stored session alone.

use crate::api::IdentityApi;
use crate::routes::{AppRoute, RouteMeta};
use crate::session::{SessionState, SessionStore};
use log::debug;
use std::future::Future;
use thiserror::Error;
use yew_router::Routable;

/// Redirects followed by [`navigate`] before giving up.
pub const MAX_REDIRECTS: usize = 8;

/// Outcome of guarding a single navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(AppRoute),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("Navigation to {requested} exceeded {limit} redirects")]
    RedirectLoop { requested: String, limit: usize },
}

/// A navigation after all redirects were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: AppRoute,
    pub resolved: AppRoute,
    pub redirects: usize,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        self.resolved != self.requested
    }

    /// Title the document should carry for the final destination.
    pub fn title(&self) -> Option<&'static str> {
        self.resolved.meta().title
    }
}

/// Decide a navigation from route metadata and the current session.
///
/// Checks run in order: authentication, guest-only pages, then role.
pub fn decide(meta: &RouteMeta, session: &SessionState) -> GuardDecision {
    let authenticated = session.user_logged_in();

    if meta.auth_required && !authenticated {
        GuardDecision::Redirect(AppRoute::Login)
    } else if meta.auth_forbidden && authenticated {
        GuardDecision::Redirect(AppRoute::User)
    } else if meta
        .role
        .as_ref()
        .is_some_and(|required| session.role() != Some(required))
    {
        GuardDecision::Redirect(AppRoute::Home)
    } else {
        GuardDecision::Allow
    }
}

/// Guard one navigation, refreshing the session first if it never was.
pub async fn before_each<A: IdentityApi>(
    session: &SessionStore<A>,
    to: &AppRoute,
) -> GuardDecision {
    if !session.state().is_store_updated() {
        let outcome = session.update_store().await;
        debug!("session refreshed before first navigation: {outcome:?}");
    }
    decide(&to.meta(), &session.state())
}

/// Guard a navigation and follow redirects to the final destination.
///
/// # Errors
/// Returns [`GuardError::RedirectLoop`] when redirects do not settle.
pub async fn navigate<A: IdentityApi>(
    session: &SessionStore<A>,
    to: AppRoute,
) -> Result<Navigation, GuardError> {
    follow_redirects(to, |route| async move { before_each(session, &route).await }).await
}

/// Apply `step` until it allows a route or [`MAX_REDIRECTS`] is exceeded.
pub(crate) async fn follow_redirects<F, Fut>(
    to: AppRoute,
    mut step: F,
) -> Result<Navigation, GuardError>
where
    F: FnMut(AppRoute) -> Fut,
    Fut: Future<Output = GuardDecision>,
{
    let mut current = to.clone();
    for redirects in 0..=MAX_REDIRECTS {
        match step(current.clone()).await {
            GuardDecision::Allow => {
                return Ok(Navigation {
                    requested: to,
                    resolved: current,
                    redirects,
                });
            }
            GuardDecision::Redirect(target) => {
                debug!("redirecting {} -> {}", current.to_path(), target.to_path());
                current = target;
            }
        }
    }
    Err(GuardError::RedirectLoop {
        requested: to.to_path(),
        limit: MAX_REDIRECTS,
    })
}

/// Apply the destination title to the document.
///
/// Routes without a title leave the current document title untouched
/// rather than resetting it to an empty or "undefined" title.
pub fn after_each(navigation: &Navigation) {
    if let Some(title) = navigation.title() {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            document.set_title(title);
        }
    }
}

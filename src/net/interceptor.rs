//! Bearer-token decoration and 401 handling for every outgoing call.
//!
//! The token is read from the auth state on each call, never captured at
//! construction, so a fresh login applies to the very next request.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::sync::Arc;

use reqwest::{RequestBuilder, StatusCode};
use tracing::warn;

use crate::routing::{Navigator, login_redirect};
use crate::state::auth::AuthState;

#[derive(Clone)]
pub struct AuthInterceptor {
    auth: Arc<AuthState>,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    #[must_use]
    pub fn new(auth: Arc<AuthState>, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, navigator }
    }

    /// Attach `Authorization: Bearer <token>` when a token is present.
    pub fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// React to a response status. On 401 the session is cleared and the
    /// navigator sent to login with the current route as `returnUrl`.
    /// Returns whether the status was an authorization failure.
    pub fn observe_status(&self, status: StatusCode) -> bool {
        if status != StatusCode::UNAUTHORIZED {
            return false;
        }
        let route = self.navigator.current_route();
        warn!(%route, "request unauthorized; clearing session");
        self.auth.logout();
        self.navigator.navigate(&login_redirect(&route));
        true
    }
}

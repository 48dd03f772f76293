//! Navigation guard for routes that need a session.

use std::sync::Arc;

use tracing::debug;

use super::{Navigator, is_public_route, login_redirect};
use crate::state::auth::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    /// Navigation was refused and the navigator sent to this login URL.
    Redirect(String),
}

pub struct AuthGuard {
    auth: Arc<AuthState>,
    navigator: Arc<dyn Navigator>,
}

impl AuthGuard {
    #[must_use]
    pub fn new(auth: Arc<AuthState>, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, navigator }
    }

    /// Allow `route` when a token is stored, otherwise redirect to login
    /// with `route` preserved as the return URL.
    pub fn check(&self, route: &str) -> GuardOutcome {
        if is_public_route(route) || self.auth.token().is_some() {
            return GuardOutcome::Allow;
        }
        let target = login_redirect(route);
        debug!(route, %target, "guard redirect");
        self.navigator.navigate(&target);
        GuardOutcome::Redirect(target)
    }
}

//! Route table, navigation seam and login redirects.
//!
//! SYSTEM CONTEXT
//! ==============
//! The interceptor and the guard both send unauthenticated users to the
//! same login entry point, carrying the route they were on as `returnUrl`
//! so login can send them back.

pub mod guard;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use parking_lot::Mutex;
use tracing::info;

pub use guard::{AuthGuard, GuardOutcome};

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DEFAULT_ROUTE: &str = "/dashboard";

/// Routes the front end knows about. Anything else lands on the dashboard.
pub const ROUTES: &[&str] = &[
    "/dashboard",
    "/invoices",
    "/vendors",
    "/users",
    "/predictions",
    "/payments",
    "/organizations",
    LOGIN_PATH,
    REGISTER_PATH,
];

/// Navigation seam between the core pipeline and whatever hosts it.
pub trait Navigator: Send + Sync {
    /// Route the user is currently on, including any query string.
    fn current_route(&self) -> String;
    fn navigate(&self, to: &str);
}

/// Navigator for headless hosts: tracks the current route and logs moves.
#[derive(Debug)]
pub struct LoggingNavigator {
    route: Mutex<String>,
    history: Mutex<Vec<String>>,
}

impl LoggingNavigator {
    #[must_use]
    pub fn new(initial_route: &str) -> Self {
        Self { route: Mutex::new(initial_route.to_owned()), history: Mutex::new(Vec::new()) }
    }

    /// Every destination passed to `navigate`, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl Default for LoggingNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTE)
    }
}

impl Navigator for LoggingNavigator {
    fn current_route(&self) -> String {
        self.route.lock().clone()
    }

    fn navigate(&self, to: &str) {
        info!(to, "navigate");
        *self.route.lock() = to.to_owned();
        self.history.lock().push(to.to_owned());
    }
}

/// Login entry point that returns to `return_url` afterwards.
#[must_use]
pub fn login_redirect(return_url: &str) -> String {
    if return_url.is_empty() || return_url == LOGIN_PATH || return_url.starts_with("/login?") {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?returnUrl={}", urlencoding::encode(return_url))
}

/// Map a requested path onto a known route. Empty and unknown paths fall back
/// to the dashboard; query strings and trailing slashes are ignored.
#[must_use]
pub fn normalize_route(path: &str) -> &'static str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');
    let path = if path.starts_with('/') { path.to_owned() } else { format!("/{path}") };
    ROUTES.iter().copied().find(|route| *route == path).unwrap_or(DEFAULT_ROUTE)
}

/// Routes reachable without a session.
#[must_use]
pub fn is_public_route(path: &str) -> bool {
    matches!(normalize_route(path), LOGIN_PATH | REGISTER_PATH)
}

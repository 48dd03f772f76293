//! Auth-session state for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Single source of truth for "who is logged in". The request interceptor
//! reads the token from here at dispatch time, route guards consult it, and a
//! 401 anywhere clears it.
//!
//! DESIGN
//! ======
//! The session lives in memory behind one lock and is mirrored into the
//! store under `authToken` / `currentUser`. Observers hold `watch` receivers,
//! which yield the latest value immediately and every change after it.
//! `establish_session` writes token and user under the same lock so no
//! observer sees a token without its user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, KeyValueStore};

#[derive(Debug, Clone, Default, PartialEq)]
struct AuthSession {
    token: Option<String>,
    user: Option<Value>,
}

/// Authentication state tracking the current user and token.
pub struct AuthState {
    store: Arc<dyn KeyValueStore>,
    session: Mutex<AuthSession>,
    user_tx: watch::Sender<Option<Value>>,
    authenticated_tx: watch::Sender<bool>,
}

impl AuthState {
    /// Hydrate from `store`. A stored user that is not valid JSON is ignored.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let token = store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty());
        let user = store.get(CURRENT_USER_KEY).and_then(|raw| parse_stored_user(&raw));
        let (user_tx, _) = watch::channel(user.clone());
        let (authenticated_tx, _) = watch::channel(token.is_some());
        Self { store, session: Mutex::new(AuthSession { token, user }), user_tx, authenticated_tx }
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<Value>> {
        self.user_tx.subscribe()
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated_tx.subscribe()
    }

    #[must_use]
    pub fn current_user_value(&self) -> Option<Value> {
        self.user_tx.borrow().clone()
    }

    /// Decode the current user into a typed record.
    #[must_use]
    pub fn current_user_as<T: DeserializeOwned>(&self) -> Option<T> {
        let user = self.current_user_value()?;
        serde_json::from_value(user).ok()
    }

    #[must_use]
    pub fn is_authenticated_value(&self) -> bool {
        *self.authenticated_tx.borrow()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.session.lock().token.clone()
    }

    pub fn set_user(&self, user: Value) {
        let mut session = self.session.lock();
        self.store.set(CURRENT_USER_KEY, &user.to_string());
        session.user = Some(user.clone());
        self.user_tx.send_replace(Some(user));
    }

    /// Replace the token. An empty token counts as none and clears it.
    pub fn set_token(&self, token: &str) {
        let mut session = self.session.lock();
        session.token = self.write_token(token);
        self.authenticated_tx.send_replace(session.token.is_some());
    }

    /// Store token and user together. A `None` user clears any previous one;
    /// an empty token leaves the session unauthenticated.
    pub fn establish_session(&self, token: &str, user: Option<Value>) {
        let mut session = self.session.lock();
        let token = self.write_token(token);
        match &user {
            Some(user) => self.store.set(CURRENT_USER_KEY, &user.to_string()),
            None => self.store.remove(CURRENT_USER_KEY),
        }
        let authenticated = token.is_some();
        *session = AuthSession { token, user: user.clone() };
        self.user_tx.send_replace(user);
        self.authenticated_tx.send_replace(authenticated);
        if authenticated {
            info!("session established");
        } else {
            warn!("empty token; session left unauthenticated");
        }
    }

    pub fn logout(&self) {
        let mut session = self.session.lock();
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(CURRENT_USER_KEY);
        *session = AuthSession::default();
        self.user_tx.send_replace(None);
        self.authenticated_tx.send_replace(false);
    }
}

impl AuthState {
    fn write_token(&self, token: &str) -> Option<String> {
        if token.is_empty() {
            self.store.remove(AUTH_TOKEN_KEY);
            None
        } else {
            self.store.set(AUTH_TOKEN_KEY, token);
            Some(token.to_owned())
        }
    }
}

fn parse_stored_user(raw: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Null) => None,
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "stored user is not valid JSON; ignoring");
            None
        }
    }
}

//! Shared client context.
//!
//! DESIGN
//! ======
//! `AppContext` is built once at startup and handed to whatever needs the
//! session or the API. It owns the store, the auth state and the resolver
//! as explicit `Arc`s; nothing here is a global, so tests build isolated
//! contexts side by side.

pub mod auth;

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::net::{ApiClient, ApiResolver, AuthInterceptor};
use crate::routing::{AuthGuard, Navigator};
use crate::storage::{self, KeyValueStore};

use auth::AuthState;

#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub auth: Arc<AuthState>,
    pub resolver: Arc<ApiResolver>,
    pub navigator: Arc<dyn Navigator>,
    pub api: ApiClient,
}

impl AppContext {
    /// Build a context using the storage backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let store = storage::open(&config.storage);
        Self::with_store(config, store, navigator)
    }

    /// Build a context over an already-open store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_store(
        config: &ApiConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        let auth = Arc::new(AuthState::new(store.clone()));
        let resolver = Arc::new(ApiResolver::with_client(http.clone(), config, store.clone()));
        let interceptor = AuthInterceptor::new(auth.clone(), navigator.clone());
        let api = ApiClient::new(http, resolver.clone(), interceptor);
        Ok(Self { store, auth, resolver, navigator, api })
    }

    #[must_use]
    pub fn guard(&self) -> AuthGuard {
        AuthGuard::new(self.auth.clone(), self.navigator.clone())
    }
}

//! Registration and login endpoints.

use reqwest::Method;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::error::ApiError;
use crate::net::ApiClient;
use crate::state::auth::AuthState;

pub struct AuthService<'a> {
    api: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /api/v1/auth/register`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ApiError> {
        self.api.post("/api/v1/auth/register", request).await
    }

    /// `POST /api/v1/auth/create-user?userId=` — an admin creating a user
    /// inside their organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_user(&self, user_id: Option<Uuid>, request: &RegisterRequest) -> Result<Value, ApiError> {
        let query: Vec<(&str, String)> = user_id.map(|id| ("userId", id.to_string())).into_iter().collect();
        let body = serde_json::to_value(request)?;
        self.api
            .execute(Method::POST, "/api/v1/auth/create-user", &query, Some(body))
            .await
    }

    /// `POST /api/v1/auth/login`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.api.post("/api/v1/auth/login", request).await
    }

    /// Log in and store the returned token and user in one step. A response
    /// without a token, or with an empty one, leaves the session untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the login call fails.
    pub async fn login_and_establish(
        &self,
        request: &LoginRequest,
        auth: &AuthState,
    ) -> Result<LoginResponse, ApiError> {
        let response = self.login(request).await?;
        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            auth.establish_session(token, response.user.clone());
            info!(email = %request.email, "logged in");
        }
        Ok(response)
    }
}

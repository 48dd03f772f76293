//! Authenticated request pipeline shared by every service client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each call resolves the origin (probing once per process), passes through
//! the interceptor for the bearer header, and on failure lets the
//! interceptor see the status before the error goes back to the caller.
//!
//! ERROR HANDLING
//! ==============
//! Non-success responses become `ApiError::Status` carrying the raw body.
//! A 401 additionally clears the session; the error itself is returned
//! unchanged so callers can still show it.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::interceptor::AuthInterceptor;
use super::resolver::ApiResolver;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    resolver: Arc<ApiResolver>,
    interceptor: AuthInterceptor,
}

impl ApiClient {
    #[must_use]
    pub fn new(http: reqwest::Client, resolver: Arc<ApiResolver>, interceptor: AuthInterceptor) -> Self {
        Self { http, resolver, interceptor }
    }

    #[must_use]
    pub fn resolver(&self) -> &ApiResolver {
        &self.resolver
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.execute(Method::GET, path, &[], None).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, &[], Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, &[], Some(body)).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::execute`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Send one request against the resolved origin.
    ///
    /// An empty response body decodes as JSON `null`, so `()`, `Option<T>`
    /// and `Value` targets accept bodiless success responses.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails in transit, the server responds
    /// with a non-success status, or the body does not decode into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let text = self.send(method, path, query, body).await?;
        decode_body(&text)
    }

    /// Send one request and return the raw success body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<String, ApiError> {
        let origin = self.resolver.resolve().await;
        let url = join_url(&origin, path);
        debug!(%method, %url, "api request");

        let request = self.http.request(method.clone(), &url);
        let request = if query.is_empty() { request } else { request.query(query) };
        let request = if let Some(json) = body { request.json(&json) } else { request };
        let request = self.interceptor.decorate(request);

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            self.interceptor.observe_status(status);
            debug!(%method, %url, status = status.as_u16(), "api request failed");
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), body });
        }

        Ok(response.text().await?)
    }
}

fn join_url(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    if path.starts_with('/') { format!("{origin}{path}") } else { format!("{origin}/{path}") }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(text)?)
}

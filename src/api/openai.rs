//! Server-side AI helpers. Responses are free-form and returned as JSON.

use serde_json::Value;

use super::models::{AnalyzeInvoiceRequest, CashflowRequest, ChatRequest};
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct OpenAiService<'a> {
    api: &'a ApiClient,
}

impl<'a> OpenAiService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn chat(&self, request: &ChatRequest) -> Result<Value, ApiError> {
        self.api.post("/api/OpenAI/chat", request).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn analyze_invoice(&self, request: &AnalyzeInvoiceRequest) -> Result<Value, ApiError> {
        self.api.post("/api/OpenAI/analyze-invoice", request).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn predict_cashflow(&self, request: &CashflowRequest) -> Result<Value, ApiError> {
        self.api.post("/api/OpenAI/predict-cashflow", request).await
    }
}

use reqwest::Method;
use uuid::Uuid;

use super::models::CashflowPrediction;
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct CashflowService<'a> {
    api: &'a ApiClient,
}

impl<'a> CashflowService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list(&self, org_id: Uuid) -> Result<Vec<CashflowPrediction>, ApiError> {
        self.api.get(&format!("/api/CashflowPrediction/{org_id}")).await
    }

    /// Prediction for one calendar month, if the server has one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn for_month(&self, org_id: Uuid, year: i32, month: u32) -> Result<Option<CashflowPrediction>, ApiError> {
        self.api
            .get(&format!("/api/CashflowPrediction/{org_id}/{year}/{month}"))
            .await
    }

    /// Ask the server to regenerate predictions for `org_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn generate(&self, org_id: Uuid) -> Result<Vec<CashflowPrediction>, ApiError> {
        let generated: Option<Vec<CashflowPrediction>> = self
            .api
            .execute(Method::POST, &format!("/api/CashflowPrediction/generate/{org_id}"), &[], None)
            .await?;
        Ok(generated.unwrap_or_default())
    }
}

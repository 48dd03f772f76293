use uuid::Uuid;

use super::models::Invoice;
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct InvoiceService<'a> {
    api: &'a ApiClient,
}

impl<'a> InvoiceService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list(&self, org_id: Uuid) -> Result<Vec<Invoice>, ApiError> {
        self.api.get(&format!("/api/v1/invoices/{org_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn details(&self, id: Uuid) -> Result<Invoice, ApiError> {
        self.api.get(&format!("/api/v1/invoices/details/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create(&self, invoice: &Invoice) -> Result<Invoice, ApiError> {
        self.api.post("/api/v1/invoices", invoice).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(&self, id: Uuid, invoice: &Invoice) -> Result<Option<Invoice>, ApiError> {
        self.api.put(&format!("/api/v1/invoices/{id}"), invoice).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/v1/invoices/{id}")).await
    }
}

use uuid::Uuid;

use super::models::{Payment, PaymentRequest};
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct PaymentService<'a> {
    api: &'a ApiClient,
}

impl<'a> PaymentService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create(&self, payment: &PaymentRequest) -> Result<Payment, ApiError> {
        self.api.post("/api/v1/payments", payment).await
    }

    /// Payments recorded against one invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn for_invoice(&self, invoice_id: Uuid) -> Result<Vec<Payment>, ApiError> {
        self.api.get(&format!("/api/v1/payments/invoice/{invoice_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn for_org(&self, org_id: Uuid) -> Result<Vec<Payment>, ApiError> {
        self.api.get(&format!("/api/v1/payments/org/{org_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self, id: Uuid) -> Result<Payment, ApiError> {
        self.api.get(&format!("/api/v1/payments/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(&self, id: Uuid, payment: &PaymentRequest) -> Result<Option<Payment>, ApiError> {
        self.api.put(&format!("/api/v1/payments/{id}"), payment).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/v1/payments/{id}")).await
    }
}

use uuid::Uuid;

use super::models::Vendor;
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct VendorService<'a> {
    api: &'a ApiClient,
}

impl<'a> VendorService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list(&self, org_id: Uuid) -> Result<Vec<Vendor>, ApiError> {
        self.api.get(&format!("/api/vendors/{org_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create(&self, org_id: Uuid, vendor: &Vendor) -> Result<Vendor, ApiError> {
        self.api.post(&format!("/api/vendors/{org_id}"), vendor).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn detail(&self, id: Uuid) -> Result<Vendor, ApiError> {
        self.api.get(&format!("/api/vendors/detail/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(&self, id: Uuid, vendor: &Vendor) -> Result<Option<Vendor>, ApiError> {
        self.api.put(&format!("/api/vendors/{id}"), vendor).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/vendors/{id}")).await
    }
}

use uuid::Uuid;

use super::models::Organization;
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct OrganizationService<'a> {
    api: &'a ApiClient,
}

impl<'a> OrganizationService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create(&self, org: &Organization) -> Result<Organization, ApiError> {
        self.api.post("/api/v1/organizations", org).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list(&self) -> Result<Vec<Organization>, ApiError> {
        self.api.get("/api/v1/organizations").await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self, id: Uuid) -> Result<Organization, ApiError> {
        self.api.get(&format!("/api/v1/organizations/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update(&self, id: Uuid, org: &Organization) -> Result<Option<Organization>, ApiError> {
        self.api.put(&format!("/api/v1/organizations/{id}"), org).await
    }
}

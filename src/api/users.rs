use uuid::Uuid;

use super::models::{UpdateUserRole, User};
use crate::error::ApiError;
use crate::net::ApiClient;

pub struct UserService<'a> {
    api: &'a ApiClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn for_org(&self, org_id: Uuid) -> Result<Vec<User>, ApiError> {
        self.api.get(&format!("/api/v1/users/organization/{org_id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn get(&self, id: Uuid) -> Result<User, ApiError> {
        self.api.get(&format!("/api/v1/users/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/v1/users/{id}")).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update_role(&self, id: Uuid, role: &str) -> Result<Option<User>, ApiError> {
        let body = UpdateUserRole { role: role.to_owned() };
        self.api.put(&format!("/api/v1/users/{id}/role"), &body).await
    }
}

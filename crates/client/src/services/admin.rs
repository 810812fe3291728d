//! Admin panel endpoints.
//!
//! Admin gating lives on the server; these wrappers only surface the 403s.
//! The cached user's role decides whether a front end shows admin surfaces
//! at all, via [`crate::session::SessionStore::is_admin`].

use std::path::Path;

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use easy_gadget_core::UserId;

use crate::api::wire::{WireMessage, WireUpload};
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::{AdminProfile, AdminProfileUpdate, AdminUser, DashboardStats};

/// Typed wrapper over the `/admin` endpoints.
#[derive(Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Dashboard headline numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 for non-admin callers.
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.api.get("/analytics/dashboard", Auth::Required).await
    }

    /// The admin's own profile.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 for non-admin callers.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<AdminProfile, ApiError> {
        self.api.get("/admin/profile", Auth::Required).await
    }

    /// Apply a partial profile update; omitted fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the update is rejected.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &AdminProfileUpdate) -> Result<AdminProfile, ApiError> {
        self.api.put("/admin/profile", update, Auth::Required).await
    }

    /// Replace the admin's avatar image, returning the served URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Io`] if the file cannot be read, or
    /// [`ApiError::Status`] if the upload is rejected.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn update_avatar(&self, path: &Path) -> Result<String, ApiError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "avatar".to_owned(), |name| name.to_string_lossy().into_owned());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let response: WireUpload = self.api.upload("/users/avatar", form).await?;
        Ok(response.url)
    }

    /// List every registered user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 403 for non-admin callers.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.api.get("/users", Auth::Required).await
    }

    /// Delete a user account.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown user.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<String, ApiError> {
        let response: WireMessage = self
            .api
            .delete(&format!("/users/{id}"), Auth::Required)
            .await?;
        Ok(response.message)
    }
}

//! Account settings endpoints.

use serde::Serialize;
use tracing::instrument;

use crate::api::{ApiClient, ApiError, Auth};
use crate::types::{SettingsUpdate, UserSettings};

/// Typed wrapper over the `/settings` endpoints.
#[derive(Clone)]
pub struct SettingsService {
    api: ApiClient,
}

#[derive(Serialize)]
struct ToggleRequest {
    enabled: bool,
}

impl SettingsService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch the current user's settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<UserSettings, ApiError> {
        self.api.get("/settings", Auth::Required).await
    }

    /// Apply a partial settings update; omitted fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the update is rejected.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: &SettingsUpdate) -> Result<UserSettings, ApiError> {
        self.api.put("/settings", update, Auth::Required).await
    }

    /// Enable or disable email notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the toggle is rejected.
    #[instrument(skip(self))]
    pub async fn set_email_notifications(&self, enabled: bool) -> Result<UserSettings, ApiError> {
        self.api
            .put(
                "/settings/notifications/email",
                &ToggleRequest { enabled },
                Auth::Required,
            )
            .await
    }

    /// Enable or disable SMS notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] if the toggle is rejected.
    #[instrument(skip(self))]
    pub async fn set_sms_notifications(&self, enabled: bool) -> Result<UserSettings, ApiError> {
        self.api
            .put(
                "/settings/notifications/sms",
                &ToggleRequest { enabled },
                Auth::Required,
            )
            .await
    }
}

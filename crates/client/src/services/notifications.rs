//! Notification endpoints.

use tracing::instrument;

use easy_gadget_core::NotificationId;

use crate::api::conversions::convert_notification_page;
use crate::api::wire::WireNotificationPage;
use crate::api::{ApiClient, ApiError, Auth};
use crate::types::NotificationPage;

/// Typed wrapper over the `/notifications` endpoints.
#[derive(Clone)]
pub struct NotificationService {
    api: ApiClient,
}

impl NotificationService {
    pub(crate) const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// A page of the current user's notifications, plus the unread count
    /// across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn list(&self, page: u32, limit: u32) -> Result<NotificationPage, ApiError> {
        let query = [("page", page.to_string()), ("limit", limit.to_string())];
        let response: WireNotificationPage = self
            .api
            .get_with_query("/notifications", &query, Auth::Required)
            .await?;
        Ok(convert_notification_page(response))
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 404 for an unknown notification.
    #[instrument(skip(self), fields(notification_id = %id))]
    pub async fn mark_read(&self, id: &NotificationId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .api
            .patch(&format!("/notifications/{id}/read"), Auth::Required)
            .await?;
        Ok(())
    }

    /// Mark every notification as read.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with 401 when not logged in.
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .api
            .patch("/notifications/mark-all-read", Auth::Required)
            .await?;
        Ok(())
    }
}

//! Notification commands.
//!
//! # Usage
//!
//! ```bash
//! eg-cli notifications list --page 1 --limit 20
//! eg-cli notifications read <notification-id>
//! eg-cli notifications read-all
//! ```

use clap::Subcommand;
use thiserror::Error;

use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::NotificationId;

#[derive(Subcommand)]
pub enum NotificationAction {
    /// List notifications
    List {
        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Page size
        #[arg(short, long, default_value_t = 20)]
        limit: u32,

        /// Only show unread notifications
        #[arg(short, long)]
        unread_only: bool,
    },
    /// Mark one notification as read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification as read
    ReadAll,
}

/// Errors that can occur during notification commands.
#[derive(Debug, Error)]
pub enum NotificationCommandError {
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(client: &Client, action: NotificationAction) -> Result<(), NotificationCommandError> {
    match action {
        NotificationAction::List {
            page,
            limit,
            unread_only,
        } => {
            let result = client.notifications().list(page, limit).await?;
            tracing::info!(
                "Page {}/{} ({} unread)",
                result.page,
                result.total.div_ceil(result.limit.max(1)),
                result.unread_count
            );
            for notification in result
                .notifications
                .iter()
                .filter(|n| !unread_only || !n.read)
            {
                let marker = if notification.read { " " } else { "*" };
                tracing::info!(
                    "{marker} [{}] {}: {}",
                    notification.id,
                    notification.title,
                    notification.message
                );
            }
        }
        NotificationAction::Read { id } => {
            client
                .notifications()
                .mark_read(&NotificationId::new(id))
                .await?;
            tracing::info!("Marked as read");
        }
        NotificationAction::ReadAll => {
            client.notifications().mark_all_read().await?;
            tracing::info!("All notifications marked as read");
        }
    }
    Ok(())
}

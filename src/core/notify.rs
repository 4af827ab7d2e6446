use crate::dtos::CreateNotificationDTO;
use crate::repositories::{Create, NotificationRepository};
use tracing::{debug, error};

/// Best-effort notification dispatch.
///
/// A failed write is logged and swallowed: the triggering operation has
/// already committed and must not fail because of its notification.
#[derive(Clone)]
pub struct NotificationDispatcher {
    repository: NotificationRepository,
}

impl NotificationDispatcher {
    pub fn new(repository: NotificationRepository) -> Self {
        Self { repository }
    }

    pub async fn notify(&self, notification: CreateNotificationDTO) {
        debug!(
            "Dispatching '{}' notification to user {}",
            notification.kind, notification.user_id
        );
        if let Err(err) = self.repository.create(&notification).await {
            error!(
                "Failed to deliver notification to user {}: {:?}",
                notification.user_id, err
            );
        }
    }
}

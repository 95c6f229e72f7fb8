use tracing::{debug, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Notification, NotificationCreate, User};
use crate::notification_actor::{NotificationAction, NotificationActionResult, NotificationError};

/// Client for the notification center.
///
/// All visibility filtering happens here, over a fresh list from the actor,
/// so derived views are never stale.
#[derive(Clone)]
pub struct NotificationClient {
    inner: ResourceClient<Notification>,
}

impl NotificationClient {
    pub fn new(inner: ResourceClient<Notification>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, notification), fields(recipient = %notification.recipient, kind = ?notification.kind))]
    pub async fn notify(&self, notification: NotificationCreate) -> Result<String, NotificationError> {
        debug!("Sending request");
        let id = self.inner.create(notification).await?;
        info!(notification_id = %id, "Notification sent");
        Ok(id)
    }

    /// Marks a notification read. Returns whether anything changed.
    ///
    /// Unknown ids are ignored: the notification may have been acknowledged
    /// elsewhere already.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: String) -> Result<bool, NotificationError> {
        debug!("Sending request");
        match self.inner.perform_action(id, NotificationAction::MarkRead).await {
            Ok(NotificationActionResult::MarkRead(changed)) => Ok(changed),
            Err(FrameworkError::NotFound(_)) => {
                debug!("Unknown notification, nothing to mark");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Marks every unread notification visible to `user`. Returns how many flipped.
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn mark_all_read(&self, user: &User) -> Result<usize, NotificationError> {
        let mut changed = 0;
        for notification in self.unread_for(user).await? {
            if self.mark_read(notification.id).await? {
                changed += 1;
            }
        }
        info!(changed, "Marked notifications read");
        Ok(changed)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: String) -> Result<Option<Notification>, NotificationError> {
        Ok(self.inner.get(id).await?)
    }

    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Notification>, NotificationError> {
        Ok(self.inner.list().await?)
    }

    /// Notifications addressed to the user's id or broadcast to their role,
    /// in creation order.
    #[instrument(skip(self, user), fields(user_id = %user.id, role = %user.role))]
    pub async fn for_user(&self, user: &User) -> Result<Vec<Notification>, NotificationError> {
        let all = self.inner.list().await?;
        Ok(all.into_iter().filter(|n| n.is_visible_to(user)).collect())
    }

    pub async fn unread_for(&self, user: &User) -> Result<Vec<Notification>, NotificationError> {
        let visible = self.for_user(user).await?;
        Ok(visible.into_iter().filter(|n| !n.read).collect())
    }

    pub async fn read_for(&self, user: &User) -> Result<Vec<Notification>, NotificationError> {
        let visible = self.for_user(user).await?;
        Ok(visible.into_iter().filter(|n| n.read).collect())
    }

    pub async fn unread_count(&self, user: &User) -> Result<usize, NotificationError> {
        Ok(self.unread_for(user).await?.len())
    }

    pub async fn shutdown(&self) -> Result<(), NotificationError> {
        Ok(self.inner.shutdown().await?)
    }
}

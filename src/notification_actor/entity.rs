use std::convert::Infallible;

use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Notification, NotificationCreate};
use super::actions::{NotificationAction, NotificationActionResult};
use super::NotificationError;

impl Entity for Notification {
    type Id = String;
    type CreateParams = NotificationCreate;
    type Patch = Infallible;
    type Action = NotificationAction;
    type ActionResult = NotificationActionResult;
    type Error = NotificationError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: NotificationCreate) -> Result<Self, NotificationError> {
        if params.message.trim().is_empty() {
            return Err(NotificationError::EmptyMessage);
        }
        Ok(Self {
            id,
            recipient: params.recipient,
            message: params.message,
            read: false,
            created_at: Utc::now(),
            kind: params.kind,
            order_id: params.order_id,
        })
    }

    /// Content is fixed once sent; only the read flag changes, via actions.
    fn on_update(&mut self, patch: Infallible) -> Result<(), NotificationError> {
        match patch {}
    }

    fn handle_action(
        &mut self,
        action: NotificationAction,
    ) -> Result<NotificationActionResult, NotificationError> {
        match action {
            NotificationAction::MarkRead => {
                let changed = !self.read;
                self.read = true;
                Ok(NotificationActionResult::MarkRead(changed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Recipient, Role};

    #[test]
    fn test_mark_read_is_one_way() {
        let params = NotificationCreate::system(Recipient::Role(Role::Admin), "Menu updated");
        let mut notification = Notification::from_create_params("notif-1".to_string(), params).unwrap();
        assert!(!notification.read);

        assert_eq!(
            notification.handle_action(NotificationAction::MarkRead),
            Ok(NotificationActionResult::MarkRead(true))
        );
        assert_eq!(
            notification.handle_action(NotificationAction::MarkRead),
            Ok(NotificationActionResult::MarkRead(false))
        );
        assert!(notification.read);
    }

    #[test]
    fn test_blank_message_rejected() {
        let params = NotificationCreate::system(Recipient::User("u".to_string()), "  ");
        assert_eq!(
            Notification::from_create_params("notif-1".to_string(), params),
            Err(NotificationError::EmptyMessage)
        );
    }
}

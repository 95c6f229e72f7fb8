/// Custom actions for Notification entities.
#[derive(Debug, Clone)]
pub enum NotificationAction {
    MarkRead,
}

/// Results from NotificationActions - variants match 1:1 with NotificationAction
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationActionResult {
    /// `true` if the flag flipped, `false` if it was already read.
    MarkRead(bool),
}

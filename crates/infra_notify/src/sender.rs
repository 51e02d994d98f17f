//! The notification delivery port

use std::sync::Mutex;

use thiserror::Error;

/// A fully formatted message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Errors a delivery channel can raise
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The channel could not deliver the message
    #[error("delivery to {recipient} failed: {reason}")]
    DeliveryFailed { recipient: String, reason: String },
}

/// Delivery channel for formatted notifications
pub trait NotificationSender: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Sender that records messages instead of delivering them
///
/// The channel used in tests and in deployments without an outbound
/// messaging integration.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in delivery order
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("sender poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().expect("sender poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSender for RecordingSender {
    fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "notification recorded"
        );
        self.sent.lock().expect("sender poisoned").push(notification);
        Ok(())
    }
}

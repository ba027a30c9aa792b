use serde::{Deserialize, Serialize};

/// Outbound message handed to whatever transport the deployment wires in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Trait describing outbound notification hooks (e-mail adapters and the
/// like). Send failures are always non-fatal to the invoking workflow.
pub trait NotificationSender: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), NotificationError>;
}

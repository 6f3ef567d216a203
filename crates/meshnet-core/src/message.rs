use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message submitted for delivery across the mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier (UUID v7, time-ordered).
    pub id: Uuid,
    /// Node id of the sender.
    pub sender: String,
    /// Node id of the recipient. Ignored for SOS messages.
    pub recipient: Option<String>,
    /// Free-form payload.
    pub body: String,
    /// Emergency flag. SOS messages are fanned out to every online node.
    #[serde(default)]
    pub sos: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a point-to-point message.
    pub fn direct(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender: sender.into(),
            recipient: Some(recipient.into()),
            body: body.into(),
            sos: false,
            created_at: Utc::now(),
        }
    }

    /// Create an emergency message addressed to nobody in particular.
    pub fn sos(sender: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender: sender.into(),
            recipient: None,
            body: body.into(),
            sos: true,
            created_at: Utc::now(),
        }
    }
}

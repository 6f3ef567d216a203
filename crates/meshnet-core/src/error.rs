/// Core errors raised by live state mutation and snapshot loading.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unknown node: {0}")]
    UnknownNode(String),

    #[error("unknown link: {0}")]
    UnknownLink(String),

    #[error("invalid link {id}: {reason}")]
    InvalidLink { id: String, reason: String },

    #[error("snapshot decode error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while planning message delivery.
///
/// Route queries themselves never fail: an unreachable or unknown endpoint
/// is an absent result. These variants only surface when a caller needs a
/// route and there is none to hand out.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("no route found from {from} to {to}")]
    NoRouteFound { from: String, to: String },

    #[error("message has no recipient")]
    MissingRecipient,

    #[error("unknown sender: {0}")]
    UnknownSender(String),

    #[error("no online recipients for emergency broadcast from {sender}")]
    NoOnlineRecipients { sender: String },
}

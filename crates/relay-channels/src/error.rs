use thiserror::Error;

/// Errors a channel sink can report while delivering a response.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// A message could not be delivered to the remote endpoint.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The placeholder message could not be edited.
    #[error("Edit failed: {0}")]
    EditFailed(String),

    /// `edit_placeholder` was called before `send_placeholder` succeeded.
    #[error("No placeholder message to edit")]
    NoPlaceholder,

    /// The channel rejected the supplied credentials or token.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
}

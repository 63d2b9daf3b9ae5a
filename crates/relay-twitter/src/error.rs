use relay_channels::ChannelError;

/// Errors produced by the Twitter adapter and its API client.
#[derive(Debug, thiserror::Error)]
pub enum TwitterError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twitter API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("delivery error: {0}")]
    Delivery(#[from] ChannelError),

    #[error("missing Twitter credential: {0}")]
    MissingCredentials(&'static str),
}

impl TwitterError {
    /// True when the API rejected our credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, TwitterError::Api { status: 401 | 403, .. })
    }
}

impl From<TwitterError> for ChannelError {
    fn from(e: TwitterError) -> Self {
        if e.is_auth() {
            ChannelError::AuthFailed(e.to_string())
        } else {
            ChannelError::SendFailed(e.to_string())
        }
    }
}

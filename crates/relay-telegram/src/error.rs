use relay_channels::ChannelError;

/// Errors produced by the Telegram adapter.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("teloxide error: {0}")]
    Teloxide(#[from] teloxide::RequestError),

    #[error("delivery error: {0}")]
    Delivery(#[from] ChannelError),

    #[error("no bot token configured")]
    NoToken,
}

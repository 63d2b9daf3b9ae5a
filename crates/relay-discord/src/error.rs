use relay_channels::ChannelError;

/// Errors produced by the Discord adapter.
#[derive(Debug, thiserror::Error)]
pub enum DiscordError {
    #[error("serenity error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("delivery error: {0}")]
    Delivery(#[from] ChannelError),

    #[error("no bot token configured")]
    NoToken,
}

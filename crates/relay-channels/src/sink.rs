use async_trait::async_trait;

use crate::error::ChannelError;

/// Outbound side of a single conversation turn on one platform.
///
/// A sink is created per inbound event and owned by the task handling it,
/// so methods take `&mut self` and implementations can remember the
/// placeholder message they sent.
#[async_trait]
pub trait ChannelSink: Send {
    /// Post the provisional "thinking" message.
    ///
    /// Platforms without an editable placeholder may treat this as a no-op.
    async fn send_placeholder(&mut self, text: &str) -> Result<(), ChannelError>;

    /// Replace the placeholder with `text` (the first response chunk).
    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError>;

    /// Send `text` as a new, separate message after the placeholder.
    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError>;
}

use tracing::debug;

use crate::chunk::split_chunks;
use crate::error::ChannelError;
use crate::sink::ChannelSink;

/// Text used in place of an empty completion; platforms reject empty messages.
pub const EMPTY_RESPONSE: &str = "(no response)";

/// Deliver `text` through `sink`, split into chunks of at most `limit` characters.
///
/// The first chunk replaces the placeholder; every further chunk is sent as a
/// new message, in order. Stops at the first sink error.
pub async fn deliver<S>(text: &str, limit: usize, sink: &mut S) -> Result<(), ChannelError>
where
    S: ChannelSink + ?Sized,
{
    let chunks = split_chunks(text, limit);
    debug!(chunks = chunks.len(), limit, "delivering response");

    let Some((first, rest)) = chunks.split_first() else {
        return sink.edit_placeholder(EMPTY_RESPONSE).await;
    };

    sink.edit_placeholder(first).await?;
    for chunk in rest {
        sink.send_followup(chunk).await?;
    }
    Ok(())
}

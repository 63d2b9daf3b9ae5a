use tracing::debug;

use relay_channels::{deliver, ChannelError, ChannelSink};

use super::commands::{plan, Command, Outcome};
use super::context::RelayContext;

/// Provisional message shown while the completion is in flight.
pub const THINKING: &str = "Thinking...";

/// Run one relay turn: placeholder, one completion call, chunked delivery.
///
/// `message` must already be non-empty; callers reject empty input with a
/// static prompt before getting here. Completion failures never surface as
/// errors (the sentinel text is delivered instead); only sink errors do.
pub async fn relay_completion<C, S>(
    ctx: &C,
    message: &str,
    limit: usize,
    sink: &mut S,
) -> Result<(), ChannelError>
where
    C: RelayContext + ?Sized,
    S: ChannelSink + ?Sized,
{
    sink.send_placeholder(THINKING).await?;

    let response = ctx.completion().fetch(message).await;
    debug!(
        provider = %ctx.completion().name(),
        chars = response.chars().count(),
        limit,
        "completion received"
    );

    deliver(&response, limit, sink).await
}

/// Answer a command: either its static reply, or a full relay turn.
///
/// Static replies go out as a plain follow-up message with no placeholder.
pub async fn answer<C, S>(
    ctx: &C,
    command: Command,
    args: &str,
    limit: usize,
    sink: &mut S,
) -> Result<(), ChannelError>
where
    C: RelayContext + ?Sized,
    S: ChannelSink + ?Sized,
{
    match plan(command, args) {
        Outcome::Static(text) => sink.send_followup(text).await,
        Outcome::Relay(message) => relay_completion(ctx, message, limit, sink).await,
    }
}

//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{debug, warn};

use relay_agent::pipeline::{
    answer, greeting, parse_invocation, relay_completion, Command, CommandRegistry,
};
use relay_channels::{ChannelError, ChannelSink};

use crate::context::TelegramAppContext;
use crate::send::{TelegramSink, TELEGRAM_MESSAGE_LIMIT};

/// Name used in the `/call` greeting when the sender has no first name.
pub const FALLBACK_NAME: &str = "User";

/// What to do with an incoming text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Unknown command or empty text.
    Ignore,
    /// A registered command and its (possibly empty) argument text.
    Command { command: Command, args: String },
    /// Plain text relayed as-is.
    Relay(String),
}

/// Classify `text` against the command table.
pub fn route(registry: &CommandRegistry, text: &str) -> Route {
    if let Some(inv) = parse_invocation(text) {
        return match registry.resolve(&inv.name) {
            Some(spec) => Route::Command {
                command: spec.command,
                args: inv.args.to_string(),
            },
            None => Route::Ignore,
        };
    }

    // A lone "/" or "/@bot" is not a command but is not conversation either.
    let text = text.trim();
    if text.is_empty() || text.starts_with('/') {
        Route::Ignore
    } else {
        Route::Relay(text.to_string())
    }
}

/// Carry out `route` against `sink`.
///
/// `/call` greets the sender before anything else, even when its argument
/// is missing.
pub async fn respond<C, S>(
    ctx: &C,
    route: Route,
    first_name: &str,
    sink: &mut S,
) -> Result<(), ChannelError>
where
    C: TelegramAppContext + ?Sized,
    S: ChannelSink + ?Sized,
{
    match route {
        Route::Ignore => Ok(()),
        Route::Command {
            command: Command::Call,
            args,
        } => {
            sink.send_followup(&greeting(first_name)).await?;
            answer(ctx, Command::Call, &args, TELEGRAM_MESSAGE_LIMIT, sink).await
        }
        Route::Command { command, args } => {
            answer(ctx, command, &args, TELEGRAM_MESSAGE_LIMIT, sink).await
        }
        Route::Relay(text) => relay_completion(ctx, &text, TELEGRAM_MESSAGE_LIMIT, sink).await,
    }
}

/// Main message handler registered in the teloxide Dispatcher.
///
/// Filters out bots and non-text messages, routes the text, then hands the
/// turn to its own task so the dispatcher keeps polling.
pub async fn handle_message<C: TelegramAppContext + 'static>(
    bot: Bot,
    msg: Message,
    ctx: Arc<C>,
    commands: Arc<CommandRegistry>,
) -> ResponseResult<()> {
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    let route = route(&commands, text);
    if route == Route::Ignore {
        debug!(chat_id = msg.chat.id.0, "ignoring message");
        return Ok(());
    }

    let first_name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string());
    let chat_id = msg.chat.id;
    let message_id = msg.id;

    tokio::spawn(async move {
        let mut sink = TelegramSink::new(bot, chat_id).replying_to(message_id);
        if let Err(e) = respond(ctx.as_ref(), route, &first_name, &mut sink).await {
            warn!(error = %e, chat_id = chat_id.0, "Telegram delivery failed");
        }
    });

    Ok(())
}

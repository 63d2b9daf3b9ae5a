//! Command parsing and per-event handling for mentions and DMs.

use relay_agent::pipeline::{answer, greeting, Command, CommandRegistry, CommandSpec};
use relay_channels::{ChannelError, ChannelSink};

use crate::context::TwitterAppContext;
use crate::send::TWITTER_MESSAGE_LIMIT;

/// Commands this adapter answers.
pub fn registry() -> CommandRegistry {
    CommandRegistry::new()
        .with(CommandSpec::call())
        .with(CommandSpec::ask())
}

/// Drop the leading `@handle` tokens a reply-to-bot tweet starts with.
pub fn strip_mentions(text: &str) -> &str {
    let mut rest = text.trim_start();
    while rest.starts_with('@') {
        rest = match rest.find(char::is_whitespace) {
            Some(idx) => rest[idx..].trim_start(),
            None => "",
        };
    }
    rest
}

/// First whitespace-separated token and the trimmed remainder.
pub fn split_command(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}

/// Command in a mention: the first token after the handles *contains* `/call` or `/ask`.
pub fn mention_command<'a>(registry: &CommandRegistry, text: &'a str) -> Option<(Command, &'a str)> {
    let (head, args) = split_command(strip_mentions(text));
    registry.find_in(head).map(|spec| (spec.command, args))
}

/// Command in a DM: the first token must be exactly `/call` or `/ask`.
pub fn dm_command<'a>(registry: &CommandRegistry, text: &'a str) -> Option<(Command, &'a str)> {
    let (head, args) = split_command(text);
    let name = head.strip_prefix('/')?;
    registry
        .resolve(name)
        .filter(|spec| spec.name == name)
        .map(|spec| (spec.command, args))
}

/// Answer a mention. `/call` first posts a greeting reply to `author`.
pub async fn handle_mention<C, S>(
    ctx: &C,
    command: Command,
    args: &str,
    author: &str,
    sink: &mut S,
) -> Result<(), ChannelError>
where
    C: TwitterAppContext + ?Sized,
    S: ChannelSink + ?Sized,
{
    if command == Command::Call {
        sink.send_followup(&greeting(author)).await?;
    }
    answer(ctx, command, args, TWITTER_MESSAGE_LIMIT, sink).await
}

/// Answer a DM: "Thinking..." then the chunks, each as its own message.
pub async fn handle_dm<C, S>(
    ctx: &C,
    command: Command,
    args: &str,
    sink: &mut S,
) -> Result<(), ChannelError>
where
    C: TwitterAppContext + ?Sized,
    S: ChannelSink + ?Sized,
{
    answer(ctx, command, args, TWITTER_MESSAGE_LIMIT, sink).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_handles_only() {
        assert_eq!(strip_mentions("@bot @other /ask hi @bot"), "/ask hi @bot");
        assert_eq!(strip_mentions("  /call x"), "/call x");
        assert_eq!(strip_mentions("@bot"), "");
    }

    #[test]
    fn mention_commands_match_loosely() {
        let reg = registry();
        assert_eq!(
            mention_command(&reg, "@bot /ask what is rust?"),
            Some((Command::Ask, "what is rust?"))
        );
        assert_eq!(
            mention_command(&reg, "@bot hey/call me maybe"),
            Some((Command::Call, "me maybe"))
        );
        assert_eq!(mention_command(&reg, "@bot hello /ask"), None);
        assert_eq!(mention_command(&reg, "@bot"), None);
    }

    #[test]
    fn dm_commands_match_exactly() {
        let reg = registry();
        assert_eq!(dm_command(&reg, "/call hi there"), Some((Command::Call, "hi there")));
        assert_eq!(dm_command(&reg, "/ask"), Some((Command::Ask, "")));
        assert_eq!(dm_command(&reg, "/ASK why"), None);
        assert_eq!(dm_command(&reg, "/asking why"), None);
        assert_eq!(dm_command(&reg, "please /ask"), None);
    }
}

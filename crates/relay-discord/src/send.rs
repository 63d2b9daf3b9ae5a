//! Outbound side of a Discord relay turn.
//!
//! Every answer is private to the user who asked: the placeholder, the edit
//! and any extra chunks are ephemeral interaction follow-ups.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::CreateInteractionResponseFollowup;
use serenity::http::Http;
use serenity::model::application::{CommandInteraction, ModalInteraction};
use serenity::model::channel::Message;
use serenity::model::id::MessageId;

use relay_channels::{ChannelError, ChannelSink};

/// Maximum characters per Discord message.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// The interaction a relay turn answers.
#[derive(Debug, Clone)]
pub enum FollowupTarget {
    Command(CommandInteraction),
    Modal(ModalInteraction),
}

impl FollowupTarget {
    async fn create(&self, http: &Arc<Http>, text: &str) -> serenity::Result<Message> {
        let builder = ephemeral_followup(text);
        match self {
            Self::Command(i) => i.create_followup(http, builder).await,
            Self::Modal(i) => i.create_followup(http, builder).await,
        }
    }

    async fn edit(&self, http: &Arc<Http>, id: MessageId, text: &str) -> serenity::Result<Message> {
        let builder = CreateInteractionResponseFollowup::new().content(text);
        match self {
            Self::Command(i) => i.edit_followup(http, id, builder).await,
            Self::Modal(i) => i.edit_followup(http, id, builder).await,
        }
    }
}

/// Ephemeral follow-up carrying `text`.
pub fn ephemeral_followup(text: &str) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(text)
        .ephemeral(true)
}

/// [`ChannelSink`] over the follow-ups of one deferred interaction.
pub struct DiscordSink {
    http: Arc<Http>,
    target: FollowupTarget,
    placeholder: Option<MessageId>,
}

impl DiscordSink {
    pub fn new(http: Arc<Http>, target: FollowupTarget) -> Self {
        Self {
            http,
            target,
            placeholder: None,
        }
    }
}

#[async_trait]
impl ChannelSink for DiscordSink {
    async fn send_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        let msg = self
            .target
            .create(&self.http, text)
            .await
            .map_err(|e| ChannelError::SendFailed(e.to_string()))?;
        self.placeholder = Some(msg.id);
        Ok(())
    }

    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        let id = self.placeholder.ok_or(ChannelError::NoPlaceholder)?;
        self.target
            .edit(&self.http, id, text)
            .await
            .map_err(|e| ChannelError::EditFailed(e.to_string()))?;
        Ok(())
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError> {
        self.target
            .create(&self.http, text)
            .await
            .map_err(|e| ChannelError::SendFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn followups_are_ephemeral() {
        let value = serde_json::to_value(ephemeral_followup("hi")).unwrap();
        assert_eq!(value["content"], "hi");
        // MessageFlags::EPHEMERAL
        assert_eq!(value["flags"], 64);
    }

    #[test]
    fn limit_matches_discord() {
        assert_eq!(DISCORD_MESSAGE_LIMIT, 2000);
        let chunks = relay_channels::split_chunks(&"d".repeat(4001), DISCORD_MESSAGE_LIMIT);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], "d");
    }
}

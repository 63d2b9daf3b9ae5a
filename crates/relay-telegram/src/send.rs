//! Message sending for the Telegram adapter.
//!
//! The placeholder is a normal chat message that gets edited in place with
//! the first chunk of the answer. Text is sent plain, without a parse mode.
//! When the sink knows the inbound message, every new message is sent as a
//! reply to it so answers stay threaded in group chats.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ReplyParameters};

use relay_channels::{ChannelError, ChannelSink};

/// Maximum characters per Telegram message.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// [`ChannelSink`] writing into one Telegram chat.
pub struct TelegramSink {
    bot: Bot,
    chat_id: ChatId,
    reply_to: Option<MessageId>,
    placeholder: Option<MessageId>,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            reply_to: None,
            placeholder: None,
        }
    }

    /// Thread every sent message under `message`.
    pub fn replying_to(mut self, message: MessageId) -> Self {
        self.reply_to = Some(message);
        self
    }

    async fn send(&self, text: &str) -> Result<Message, ChannelError> {
        let mut request = self.bot.send_message(self.chat_id, text);
        if let Some(id) = self.reply_to {
            request = request.reply_parameters(ReplyParameters::new(id));
        }
        request
            .await
            .map_err(|e| ChannelError::SendFailed(e.to_string()))
    }
}

#[async_trait]
impl ChannelSink for TelegramSink {
    async fn send_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        let msg = self.send(text).await?;
        self.placeholder = Some(msg.id);
        Ok(())
    }

    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        let id = self.placeholder.ok_or(ChannelError::NoPlaceholder)?;
        self.bot
            .edit_message_text(self.chat_id, id, text)
            .await
            .map_err(|e| ChannelError::EditFailed(e.to_string()))?;
        Ok(())
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError> {
        self.send(text).await?;
        Ok(())
    }
}

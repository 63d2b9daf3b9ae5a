//! Outbound side of the Twitter adapter.
//!
//! Tweets cannot be edited, so mention replies skip the placeholder and post
//! every chunk as its own reply. DMs cannot be edited either; there the
//! placeholder is sent and each chunk follows as a new message.

use std::sync::Arc;

use async_trait::async_trait;

use relay_channels::{ChannelError, ChannelSink};

use crate::client::TwitterClient;

/// Maximum characters of answer text per tweet or DM.
pub const TWITTER_MESSAGE_LIMIT: usize = 240;

/// Replies to one mention, addressed to its author.
pub struct MentionReplySink {
    client: Arc<TwitterClient>,
    author: String,
    tweet_id: String,
}

impl MentionReplySink {
    pub fn new(client: Arc<TwitterClient>, author: impl Into<String>, tweet_id: impl Into<String>) -> Self {
        Self {
            client,
            author: author.into(),
            tweet_id: tweet_id.into(),
        }
    }

    async fn reply(&self, text: &str) -> Result<(), ChannelError> {
        self.client
            .post_tweet(&reply_text(&self.author, text), Some(&self.tweet_id))
            .await?;
        Ok(())
    }
}

/// `@author text`
pub fn reply_text(author: &str, text: &str) -> String {
    format!("@{author} {text}")
}

#[async_trait]
impl ChannelSink for MentionReplySink {
    async fn send_placeholder(&mut self, _text: &str) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        self.reply(text).await
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError> {
        self.reply(text).await
    }
}

/// Direct messages to one participant.
pub struct DirectMessageSink {
    client: Arc<TwitterClient>,
    participant_id: String,
}

impl DirectMessageSink {
    pub fn new(client: Arc<TwitterClient>, participant_id: impl Into<String>) -> Self {
        Self {
            client,
            participant_id: participant_id.into(),
        }
    }

    async fn dm(&self, text: &str) -> Result<(), ChannelError> {
        self.client.send_dm(&self.participant_id, text).await?;
        Ok(())
    }
}

#[async_trait]
impl ChannelSink for DirectMessageSink {
    async fn send_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        self.dm(text).await
    }

    async fn edit_placeholder(&mut self, text: &str) -> Result<(), ChannelError> {
        self.dm(text).await
    }

    async fn send_followup(&mut self, text: &str) -> Result<(), ChannelError> {
        self.dm(text).await
    }
}

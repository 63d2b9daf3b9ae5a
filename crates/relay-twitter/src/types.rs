use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// `{"data": ...}` wrapper used by single-object v2 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub newest_id: Option<String>,
    #[serde(default)]
    pub result_count: Option<u32>,
}

/// One page of `GET /2/users/:id/mentions`, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentionPage {
    #[serde(default)]
    pub data: Vec<Tweet>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(default)]
    pub meta: Meta,
}

impl MentionPage {
    /// Handle of `author_id`, from the `author_id` expansion.
    pub fn username_of(&self, author_id: &str) -> Option<&str> {
        self.includes
            .users
            .iter()
            .find(|u| u.id == author_id)
            .map(|u| u.username.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DmEvent {
    pub id: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sender_id: Option<String>,
}

impl DmEvent {
    pub fn is_message(&self) -> bool {
        self.event_type == "MessageCreate"
    }
}

/// One page of `GET /2/dm_events`, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DmPage {
    #[serde(default)]
    pub data: Vec<DmEvent>,
    #[serde(default)]
    pub meta: Meta,
}

/// Body of `POST /2/tweets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTweet {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyTo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyTo {
    pub in_reply_to_tweet_id: String,
}

/// Body of `POST /2/dm_conversations/with/:participant_id/messages`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDirectMessage {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostedTweet {
    pub id: String,
    #[serde(default)]
    pub text: String,
}

/// Order snowflake ids. Numeric when both parse, otherwise longer-then-lexicographic.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
    }
}

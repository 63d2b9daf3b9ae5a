use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use relay_core::config::TwitterConfig;

use crate::error::TwitterError;
use crate::oauth::OAuth1Signer;
use crate::types::{
    DmPage, Envelope, MentionPage, NewDirectMessage, NewTweet, PostedTweet, ReplyTo, User,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Async client for the few Twitter API v2 endpoints the bot needs.
pub struct TwitterClient {
    http: reqwest::Client,
    base_url: String,
    signer: OAuth1Signer,
}

impl TwitterClient {
    pub fn new(config: &TwitterConfig) -> Result<Self, TwitterError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            signer: OAuth1Signer::from_config(config),
        })
    }

    /// The authenticated bot account.
    pub async fn me(&self) -> Result<User, TwitterError> {
        let env: Envelope<User> = self.get("/2/users/me", &[]).await?;
        Ok(env.data)
    }

    /// Mentions of `user_id` newer than `since_id`, with author handles expanded.
    pub async fn mentions(
        &self,
        user_id: &str,
        since_id: Option<&str>,
    ) -> Result<MentionPage, TwitterError> {
        let mut query = vec![
            ("expansions", "author_id"),
            ("tweet.fields", "author_id"),
            ("user.fields", "username"),
        ];
        if let Some(id) = since_id {
            query.push(("since_id", id));
        }
        self.get(&format!("/2/users/{user_id}/mentions"), &query)
            .await
    }

    /// Recent direct-message events across all conversations.
    pub async fn dm_events(&self) -> Result<DmPage, TwitterError> {
        self.get(
            "/2/dm_events",
            &[
                ("dm_event.fields", "id,text,sender_id,event_type"),
                ("event_types", "MessageCreate"),
            ],
        )
        .await
    }

    pub async fn post_tweet(
        &self,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<PostedTweet, TwitterError> {
        let body = NewTweet {
            text: text.to_string(),
            reply: in_reply_to.map(|id| ReplyTo {
                in_reply_to_tweet_id: id.to_string(),
            }),
        };
        let env: Envelope<PostedTweet> = self.post("/2/tweets", &body).await?;
        Ok(env.data)
    }

    pub async fn send_dm(&self, participant_id: &str, text: &str) -> Result<(), TwitterError> {
        let body = NewDirectMessage {
            text: text.to_string(),
        };
        let _: serde_json::Value = self
            .post(
                &format!("/2/dm_conversations/with/{participant_id}/messages"),
                &body,
            )
            .await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, TwitterError> {
        let url = format!("{}{}", self.base_url, path);
        let auth = self.signer.authorization("GET", &url, query);

        debug!(url = %url, "Twitter GET");
        let resp = self
            .http
            .get(&url)
            .query(query)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, TwitterError> {
        let url = format!("{}{}", self.base_url, path);
        let auth = self.signer.authorization("POST", &url, &[]);

        debug!(url = %url, "Twitter POST");
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, auth)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, TwitterError> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %text, "Twitter API error");
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        resp.json()
            .await
            .map_err(|e| TwitterError::Parse(e.to_string()))
    }
}

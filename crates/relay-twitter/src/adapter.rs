//! Twitter channel adapter: polls mentions and DMs on a fixed interval.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use relay_agent::pipeline::CommandRegistry;
use relay_channels::Backoff;
use relay_core::config::TwitterConfig;

use crate::client::TwitterClient;
use crate::context::TwitterAppContext;
use crate::error::TwitterError;
use crate::handler::{dm_command, handle_dm, handle_mention, mention_command, registry};
use crate::send::{DirectMessageSink, MentionReplySink};
use crate::types::{compare_ids, User};

/// Newest id seen on one timeline.
///
/// The first [`advance`](Cursor::advance) only primes the cursor, so items
/// that existed before startup are never answered.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    newest: Option<String>,
    primed: bool,
}

impl Cursor {
    pub fn newest(&self) -> Option<&str> {
        self.newest.as_deref()
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Items newer than the cursor, oldest first. Moves the cursor to the newest item.
    pub fn advance<'a, T, F>(&mut self, items: &'a [T], id: F) -> Vec<&'a T>
    where
        F: Fn(&T) -> &str,
    {
        let mut fresh: Vec<&T> = match (self.primed, self.newest.as_deref()) {
            (false, _) => Vec::new(),
            (true, None) => items.iter().collect(),
            (true, Some(newest)) => items
                .iter()
                .filter(|item| compare_ids(id(*item), newest) == Ordering::Greater)
                .collect(),
        };
        fresh.sort_by(|a, b| compare_ids(id(*a), id(*b)));

        if let Some(max) = items.iter().map(&id).max_by(|a, b| compare_ids(a, b)) {
            let newer = self
                .newest
                .as_deref()
                .map_or(true, |cur| compare_ids(max, cur) == Ordering::Greater);
            if newer {
                self.newest = Some(max.to_string());
            }
        }
        self.primed = true;
        fresh
    }
}

/// One polling pass over mentions and DMs for the authenticated account.
pub struct Poller<C: TwitterAppContext + 'static> {
    ctx: Arc<C>,
    client: Arc<TwitterClient>,
    commands: Arc<CommandRegistry>,
    me: User,
    mentions: Cursor,
    dms: Cursor,
}

impl<C: TwitterAppContext + 'static> Poller<C> {
    pub fn new(ctx: Arc<C>, client: Arc<TwitterClient>, me: User) -> Self {
        Self {
            ctx,
            client,
            commands: Arc::new(registry()),
            me,
            mentions: Cursor::default(),
            dms: Cursor::default(),
        }
    }

    /// Fetch new mentions and DMs and spawn one task per actionable item.
    ///
    /// Returns the spawned tasks; the run loop lets them finish on their own.
    pub async fn poll_once(&mut self) -> Result<Vec<JoinHandle<()>>, TwitterError> {
        let mut tasks = Vec::new();

        let page = self
            .client
            .mentions(&self.me.id, self.mentions.newest())
            .await?;
        debug!(
            result_count = page.meta.result_count.unwrap_or(0),
            newest_id = ?page.meta.newest_id,
            "Twitter: mentions page"
        );
        for tweet in self.mentions.advance(&page.data, |t| t.id.as_str()) {
            let Some(author_id) = tweet.author_id.as_deref() else {
                continue;
            };
            if author_id == self.me.id {
                continue;
            }
            let Some((command, args)) = mention_command(&self.commands, &tweet.text) else {
                debug!(tweet_id = %tweet.id, "mention without command");
                continue;
            };
            let Some(author) = page.username_of(author_id) else {
                warn!(tweet_id = %tweet.id, "mention author missing from expansion");
                continue;
            };

            let ctx = Arc::clone(&self.ctx);
            let mut sink = MentionReplySink::new(Arc::clone(&self.client), author, &tweet.id);
            let (args, author, tweet_id) = (args.to_string(), author.to_string(), tweet.id.clone());
            tasks.push(tokio::spawn(async move {
                if let Err(e) = handle_mention(ctx.as_ref(), command, &args, &author, &mut sink).await {
                    warn!(error = %e, tweet_id = %tweet_id, "Twitter reply failed");
                }
            }));
        }

        let dms = self.client.dm_events().await?;
        for event in self.dms.advance(&dms.data, |e| e.id.as_str()) {
            if !event.is_message() {
                continue;
            }
            let Some(sender) = event.sender_id.as_deref() else {
                continue;
            };
            if sender == self.me.id {
                continue;
            }
            let Some((command, args)) = dm_command(&self.commands, &event.text) else {
                continue;
            };

            let ctx = Arc::clone(&self.ctx);
            let mut sink = DirectMessageSink::new(Arc::clone(&self.client), sender);
            let (args, sender) = (args.to_string(), sender.to_string());
            tasks.push(tokio::spawn(async move {
                if let Err(e) = handle_dm(ctx.as_ref(), command, &args, &mut sink).await {
                    warn!(error = %e, sender = %sender, "Twitter DM failed");
                }
            }));
        }

        Ok(tasks)
    }
}

/// Twitter channel adapter.
pub struct TwitterAdapter<C: TwitterAppContext + 'static> {
    ctx: Arc<C>,
    config: TwitterConfig,
}

impl<C: TwitterAppContext + 'static> TwitterAdapter<C> {
    pub fn new(config: &TwitterConfig, ctx: Arc<C>) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Authenticate, then poll forever. Failed polls back off exponentially.
    pub async fn run(self) -> Result<(), TwitterError> {
        check_credentials(&self.config)?;

        let client = Arc::new(TwitterClient::new(&self.config)?);
        let interval = Duration::from_secs(self.config.poll_interval_secs.max(1));
        let mut backoff = Backoff::new();

        let me = loop {
            match client.me().await {
                Ok(user) => break user,
                Err(e) => {
                    let delay = backoff.next_delay();
                    error!(
                        error = %e,
                        attempt = backoff.attempts(),
                        retry_in = ?delay,
                        "Twitter: authentication failed"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        };
        backoff.reset();
        info!(username = %me.username, interval = ?interval, "Twitter: polling mentions and DMs");

        let mut poller = Poller::new(Arc::clone(&self.ctx), client, me);
        loop {
            match poller.poll_once().await {
                Ok(tasks) => {
                    if !tasks.is_empty() {
                        debug!(count = tasks.len(), "Twitter: dispatched events");
                    }
                    backoff.reset();
                    tokio::time::sleep(interval).await;
                }
                Err(e) => {
                    let delay = backoff.next_delay().max(interval);
                    warn!(
                        error = %e,
                        attempt = backoff.attempts(),
                        retry_in = ?delay,
                        "Twitter: poll failed"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

fn check_credentials(config: &TwitterConfig) -> Result<(), TwitterError> {
    let fields = [
        ("api_key", &config.api_key),
        ("api_secret", &config.api_secret),
        ("access_token", &config.access_token),
        ("access_secret", &config.access_secret),
    ];
    match fields.iter().find(|(_, v)| v.trim().is_empty()) {
        Some((name, _)) => Err(TwitterError::MissingCredentials(*name)),
        None => Ok(()),
    }
}

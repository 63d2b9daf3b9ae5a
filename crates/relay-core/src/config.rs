use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// Completion API defaults, matching what the hosted endpoint expects today.
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "openai/gpt-4";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_TWITTER_API_BASE_URL: &str = "https://api.twitter.com";
pub const DEFAULT_TWITTER_POLL_INTERVAL_SECS: u64 = 60;

/// Top-level config (relay.toml + RELAY_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub channels: ChannelsConfig,
}

/// Hosted completion endpoint shared by every channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
    /// Bearer credential. Not validated: an empty key fails at the first call.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on a single completion round-trip. `0` disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            base_url: default_completion_base_url(),
            api_key: String::new(),
            model: default_completion_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChannelsConfig {
    pub discord: Option<DiscordConfig>,
    pub telegram: Option<TelegramConfig>,
    pub twitter: Option<TwitterConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub bot_token: String,
    /// Application (client) ID. Optional: serenity discovers it on login.
    #[serde(default)]
    pub application_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
}

/// OAuth 1.0a user-context credentials plus polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitterConfig {
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub access_secret: String,
    #[serde(default = "default_twitter_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_twitter_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_completion_base_url() -> String {
    DEFAULT_COMPLETION_BASE_URL.to_string()
}
fn default_completion_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}
fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_twitter_api_base_url() -> String {
    DEFAULT_TWITTER_API_BASE_URL.to_string()
}
fn default_twitter_poll_interval_secs() -> u64 {
    DEFAULT_TWITTER_POLL_INTERVAL_SECS
}

impl RelayConfig {
    /// Load config from a TOML file with RELAY_* env var overrides, then fill
    /// anything still missing from the bots' well-known env var names.
    ///
    /// Path resolution:
    ///   1. Explicit path argument
    ///   2. ~/.chat-relay/relay.toml
    ///
    /// Nested keys use a double underscore: `RELAY_COMPLETION__MODEL`,
    /// `RELAY_CHANNELS__DISCORD__BOT_TOKEN`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        debug!(path = %path, "loading relay config");

        let mut config: RelayConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("RELAY_").split("__"))
            .extract()
            .map_err(|e| crate::error::RelayError::Config(e.to_string()))?;

        config.apply_env_fallbacks(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fill unset credentials from the legacy variable names
    /// (`OPEN_ROUTER_API_KEY`, `DISCORD_BOT_TOKEN`, `TWITTER_API_KEY`, …).
    ///
    /// Values already set by the file or `RELAY_*` vars always win.
    /// `lookup` is injected so tests don't have to touch the process env.
    pub fn apply_env_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if self.completion.api_key.is_empty() {
            if let Some(key) = get("OPEN_ROUTER_API_KEY") {
                self.completion.api_key = key;
            }
        }

        if self.channels.discord.is_none() {
            if let Some(token) = get("DISCORD_BOT_TOKEN") {
                self.channels.discord = Some(DiscordConfig {
                    bot_token: token,
                    application_id: get("CLIENT_ID").and_then(|id| id.parse().ok()),
                });
            }
        }

        if self.channels.telegram.is_none() {
            if let Some(token) = get("TELEGRAM_BOT_TOKEN") {
                self.channels.telegram = Some(TelegramConfig { bot_token: token });
            }
        }

        if self.channels.twitter.is_none() {
            if let Some(api_key) = get("TWITTER_API_KEY") {
                self.channels.twitter = Some(TwitterConfig {
                    api_key,
                    api_secret: get("TWITTER_API_SECRET").unwrap_or_default(),
                    access_token: get("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
                    access_secret: get("TWITTER_ACCESS_SECRET").unwrap_or_default(),
                    api_base_url: default_twitter_api_base_url(),
                    poll_interval_secs: DEFAULT_TWITTER_POLL_INTERVAL_SECS,
                });
            }
        }
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.chat-relay/relay.toml", home)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_hosted_endpoint() {
        let config = RelayConfig::default();
        assert_eq!(config.completion.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.completion.model, "openai/gpt-4");
        assert_eq!(config.completion.max_tokens, 1000);
        assert_eq!(config.completion.temperature, 1.0);
        assert!(config.channels.discord.is_none());
    }

    #[test]
    fn legacy_env_fills_missing_channels() {
        let mut config = RelayConfig::default();
        config.apply_env_fallbacks(lookup_from(&[
            ("OPEN_ROUTER_API_KEY", "sk-or-test"),
            ("DISCORD_BOT_TOKEN", "discord-token"),
            ("CLIENT_ID", "123456789"),
            ("TELEGRAM_BOT_TOKEN", "tg-token"),
            ("TWITTER_API_KEY", "ck"),
            ("TWITTER_API_SECRET", "cs"),
            ("TWITTER_ACCESS_TOKEN", "at"),
            ("TWITTER_ACCESS_SECRET", "as"),
        ]));

        assert_eq!(config.completion.api_key, "sk-or-test");
        let discord = config.channels.discord.unwrap();
        assert_eq!(discord.bot_token, "discord-token");
        assert_eq!(discord.application_id, Some(123456789));
        assert_eq!(config.channels.telegram.unwrap().bot_token, "tg-token");
        let twitter = config.channels.twitter.unwrap();
        assert_eq!(twitter.access_secret, "as");
        assert_eq!(twitter.poll_interval_secs, DEFAULT_TWITTER_POLL_INTERVAL_SECS);
    }

    #[test]
    fn configured_values_win_over_legacy_env() {
        let mut config = RelayConfig::default();
        config.completion.api_key = "from-file".to_string();
        config.channels.telegram = Some(TelegramConfig {
            bot_token: "file-token".to_string(),
        });

        config.apply_env_fallbacks(lookup_from(&[
            ("OPEN_ROUTER_API_KEY", "from-env"),
            ("TELEGRAM_BOT_TOKEN", "env-token"),
        ]));

        assert_eq!(config.completion.api_key, "from-file");
        assert_eq!(config.channels.telegram.unwrap().bot_token, "file-token");
    }

    #[test]
    fn empty_legacy_values_are_ignored() {
        let mut config = RelayConfig::default();
        config.apply_env_fallbacks(lookup_from(&[("DISCORD_BOT_TOKEN", "")]));
        assert!(config.channels.discord.is_none());
    }

    #[test]
    fn bad_client_id_is_dropped() {
        let mut config = RelayConfig::default();
        config.apply_env_fallbacks(lookup_from(&[
            ("DISCORD_BOT_TOKEN", "t"),
            ("CLIENT_ID", "not-a-number"),
        ]));
        assert_eq!(config.channels.discord.unwrap().application_id, None);
    }
}

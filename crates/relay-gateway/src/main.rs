use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use relay_agent::CompletionClient;
use relay_core::{ChannelKind, RelayConfig};

mod app;

/// Relay chat messages from Discord, Telegram and Twitter to a hosted completion API.
#[derive(Debug, Parser)]
#[command(name = "chat-relay", version)]
struct Cli {
    /// Config file. Defaults to $RELAY_CONFIG, then ~/.chat-relay/relay.toml.
    #[arg(long, short)]
    config: Option<String>,

    /// Channel to run (discord, telegram, twitter). Repeatable; default is every configured one.
    #[arg(long = "channel", value_name = "CHANNEL")]
    channels: Vec<ChannelKind>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chat_relay=info,relay_discord=info,relay_telegram=info,relay_twitter=info,relay_agent=info"
                    .into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > RELAY_CONFIG env > ~/.chat-relay/relay.toml
    let config_path = cli.config.clone().or_else(|| std::env::var("RELAY_CONFIG").ok());
    let config = RelayConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        RelayConfig::default()
    });

    let client = CompletionClient::new(&config.completion)?;
    info!(
        model = %config.completion.model,
        base_url = %config.completion.base_url,
        "completion client ready"
    );

    let (run, missing) = app::select_channels(&cli.channels, &config.channels);
    for kind in &missing {
        if !cli.channels.is_empty() {
            warn!(channel = %kind, "channel requested but not configured, skipping");
        }
    }
    if run.is_empty() {
        anyhow::bail!("no channel configured; set a bot token for discord, telegram or twitter");
    }

    let state = Arc::new(app::AppState::new(config, Box::new(client)));

    for kind in run {
        spawn_channel(kind, Arc::clone(&state));
        info!(channel = %kind, "channel started");
    }

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    Ok(())
}

/// Start one adapter in its own task. Adapters only return on fatal setup errors.
fn spawn_channel(kind: ChannelKind, state: Arc<app::AppState>) {
    match kind {
        ChannelKind::Discord => {
            let Some(cfg) = state.config.channels.discord.clone() else {
                return;
            };
            let adapter = relay_discord::DiscordAdapter::new(&cfg, state);
            tokio::spawn(async move {
                if let Err(e) = adapter.run().await {
                    error!(error = %e, "Discord adapter stopped");
                }
            });
        }
        ChannelKind::Telegram => {
            let Some(cfg) = state.config.channels.telegram.clone() else {
                return;
            };
            let adapter = relay_telegram::TelegramAdapter::new(&cfg, state);
            tokio::spawn(async move {
                if let Err(e) = adapter.run().await {
                    error!(error = %e, "Telegram adapter stopped");
                }
            });
        }
        ChannelKind::Twitter => {
            let Some(cfg) = state.config.channels.twitter.clone() else {
                return;
            };
            let adapter = relay_twitter::TwitterAdapter::new(&cfg, state);
            tokio::spawn(async move {
                if let Err(e) = adapter.run().await {
                    error!(error = %e, "Twitter adapter stopped");
                }
            });
        }
    }
}

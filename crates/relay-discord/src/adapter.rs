use std::sync::Arc;

use serenity::model::gateway::GatewayIntents;
use serenity::model::id::ApplicationId;
use serenity::Client;
use tracing::{error, info, warn};

use relay_channels::Backoff;
use relay_core::config::DiscordConfig;

use crate::commands;
use crate::context::DiscordAppContext;
use crate::error::DiscordError;
use crate::handler::DiscordHandler;

/// Discord channel adapter.
///
/// Wraps a serenity `Client` and drives the event loop until the process exits.
/// Reconnects whenever the gateway drops, backing off between attempts.
pub struct DiscordAdapter<C: DiscordAppContext + 'static> {
    ctx: Arc<C>,
    config: DiscordConfig,
}

impl<C: DiscordAppContext + 'static> DiscordAdapter<C> {
    pub fn new(config: &DiscordConfig, ctx: Arc<C>) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Connect to Discord and keep reconnecting whenever the gateway drops.
    ///
    /// Only returns early when no token is configured.
    pub async fn run(self) -> Result<(), DiscordError> {
        if self.config.bot_token.trim().is_empty() {
            return Err(DiscordError::NoToken);
        }

        // Interactions arrive regardless of intents; nothing privileged is needed.
        let intents = GatewayIntents::non_privileged();
        let registry = Arc::new(commands::registry());
        let mut backoff = Backoff::new();

        loop {
            let mut client = match self.build_client(intents, Arc::clone(&registry)).await {
                Ok(c) => c,
                Err(e) => {
                    let delay = backoff.next_delay();
                    error!(
                        error = %e,
                        attempt = backoff.attempts(),
                        retry_in = ?delay,
                        "Discord: connect failed"
                    );
                    tokio::time::sleep(delay).await;
                    continue;
                }
            };

            info!("Discord: gateway connecting");
            match client.start().await {
                Ok(()) => {
                    backoff.reset();
                    info!("Discord: gateway stopped cleanly, reconnecting");
                }
                Err(e) => warn!(error = %e, "Discord: gateway error"),
            }

            let delay = backoff.next_delay();
            info!(attempt = backoff.attempts(), retry_in = ?delay, "Discord: reconnecting");
            tokio::time::sleep(delay).await;
        }
    }

    async fn build_client(
        &self,
        intents: GatewayIntents,
        commands: Arc<relay_agent::pipeline::CommandRegistry>,
    ) -> Result<Client, serenity::Error> {
        let handler = DiscordHandler {
            ctx: Arc::clone(&self.ctx),
            commands,
        };

        let mut builder = Client::builder(&self.config.bot_token, intents).event_handler(handler);
        if let Some(id) = self.config.application_id {
            builder = builder.application_id(ApplicationId::new(id));
        }
        builder.await
    }
}

use std::sync::Arc;

use serenity::async_trait;
use serenity::model::application::Interaction;
use serenity::model::gateway::Ready;
use serenity::prelude::{Context, EventHandler};
use tracing::{info, warn};

use relay_agent::pipeline::CommandRegistry;

use crate::commands;
use crate::context::DiscordAppContext;
use crate::error::DiscordError;

/// Serenity event handler wired to the completion relay.
pub struct DiscordHandler<C: DiscordAppContext + 'static> {
    pub ctx: Arc<C>,
    pub commands: Arc<CommandRegistry>,
}

#[async_trait]
impl<C: DiscordAppContext + 'static> EventHandler for DiscordHandler<C> {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(name = %ready.user.name, "Discord bot connected");
        commands::register_commands(&ctx, &self.commands).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let app = Arc::clone(&self.ctx);
        let registry = Arc::clone(&self.commands);

        // One task per interaction; a slow completion must not block the gateway.
        tokio::spawn(async move {
            let kind = interaction_kind(&interaction);
            if let Err(e) = dispatch(app.as_ref(), &registry, &ctx, interaction).await {
                warn!(error = %e, interaction = kind, "Discord interaction failed");
            }
        });
    }
}

async fn dispatch<C: DiscordAppContext + ?Sized>(
    app: &C,
    registry: &CommandRegistry,
    ctx: &Context,
    interaction: Interaction,
) -> Result<(), DiscordError> {
    match interaction {
        Interaction::Command(command) => {
            commands::handle_command(app, registry, ctx, &command).await
        }
        Interaction::Component(component) => commands::handle_component(ctx, &component).await,
        Interaction::Modal(modal) => commands::handle_modal_submit(app, ctx, &modal).await,
        _ => Ok(()),
    }
}

fn interaction_kind(interaction: &Interaction) -> &'static str {
    match interaction {
        Interaction::Command(_) => "command",
        Interaction::Component(_) => "component",
        Interaction::Modal(_) => "modal",
        _ => "other",
    }
}

//! Discord slash commands: `/ask` (button + modal) and `/call message:<text>`.
//!
//! Registration happens in `ready()`. Interactions are dispatched from
//! `interaction_create` in the event handler.

use std::sync::Arc;

use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::application::{
    CommandInteraction, CommandOptionType, ComponentInteraction, ModalInteraction,
};
use serenity::prelude::Context;
use tracing::{debug, info, warn};

use relay_agent::pipeline::{answer, greeting, Command, CommandRegistry, CommandSpec};
use relay_channels::ChannelSink;

use crate::context::DiscordAppContext;
use crate::error::DiscordError;
use crate::modal::{ask_button_message, ask_modal, submitted_question, ASK_BUTTON_ID, ASK_MODAL_ID};
use crate::send::{DiscordSink, FollowupTarget, DISCORD_MESSAGE_LIMIT};

/// Name of the `/call` argument.
const MESSAGE_OPTION: &str = "message";

/// Commands this adapter answers. `/start` is Telegram-only.
pub fn registry() -> CommandRegistry {
    CommandRegistry::new()
        .with(CommandSpec::ask())
        .with(CommandSpec::call())
}

/// Slash command definitions for everything in `registry`.
pub fn definitions(registry: &CommandRegistry) -> Vec<CreateCommand> {
    registry
        .specs()
        .into_iter()
        .filter(|spec| spec.command != Command::Start)
        .map(|spec| {
            let command = CreateCommand::new(spec.name).description(spec.description);
            match spec.command {
                Command::Call => command.add_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        MESSAGE_OPTION,
                        "What to say to the AI",
                    )
                    .required(true),
                ),
                _ => command,
            }
        })
        .collect()
}

/// Register global slash commands. Call from `ready()`.
pub async fn register_commands(ctx: &Context, registry: &CommandRegistry) {
    match serenity::model::application::Command::set_global_commands(
        &ctx.http,
        definitions(registry),
    )
    .await
    {
        Ok(cmds) => info!(count = cmds.len(), "registered global slash commands"),
        Err(e) => warn!(error = %e, "failed to register global slash commands"),
    }
}

/// Dispatch a slash command interaction through the command table.
pub async fn handle_command<C: DiscordAppContext + ?Sized>(
    app: &C,
    registry: &CommandRegistry,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), DiscordError> {
    let Some(spec) = registry.resolve(&command.data.name) else {
        debug!(command = %command.data.name, "ignoring unregistered command");
        return Ok(());
    };

    match spec.command {
        Command::Ask => handle_ask(ctx, command).await,
        Command::Call => handle_call(app, ctx, command).await,
        Command::Start => Ok(()),
    }
}

/// `/ask`: reply privately with the button that opens the question modal.
async fn handle_ask(ctx: &Context, command: &CommandInteraction) -> Result<(), DiscordError> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(ask_button_message()),
        )
        .await?;
    Ok(())
}

/// `/call message:<text>`: greet the user by display name, then relay.
async fn handle_call<C: DiscordAppContext + ?Sized>(
    app: &C,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), DiscordError> {
    let message = command
        .data
        .options
        .iter()
        .find(|o| o.name == MESSAGE_OPTION)
        .and_then(|o| o.value.as_str())
        .unwrap_or("");

    command
        .create_response(&ctx.http, defer_ephemeral())
        .await?;

    let mut sink = DiscordSink::new(
        Arc::clone(&ctx.http),
        FollowupTarget::Command(command.clone()),
    );
    sink.send_followup(&greeting(command.user.display_name()))
        .await?;

    answer(app, Command::Call, message, DISCORD_MESSAGE_LIMIT, &mut sink).await?;
    Ok(())
}

/// Button click: open the question modal.
pub async fn handle_component(
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<(), DiscordError> {
    if component.data.custom_id != ASK_BUTTON_ID {
        return Ok(());
    }

    component
        .create_response(&ctx.http, CreateInteractionResponse::Modal(ask_modal()))
        .await?;
    Ok(())
}

/// Modal submit: relay the question privately.
pub async fn handle_modal_submit<C: DiscordAppContext + ?Sized>(
    app: &C,
    ctx: &Context,
    modal: &ModalInteraction,
) -> Result<(), DiscordError> {
    if modal.data.custom_id != ASK_MODAL_ID {
        return Ok(());
    }

    modal.create_response(&ctx.http, defer_ephemeral()).await?;

    let question = submitted_question(&modal.data.components).unwrap_or("");
    let mut sink = DiscordSink::new(Arc::clone(&ctx.http), FollowupTarget::Modal(modal.clone()));

    answer(app, Command::Ask, question, DISCORD_MESSAGE_LIMIT, &mut sink).await?;
    Ok(())
}

fn defer_ephemeral() -> CreateInteractionResponse {
    CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new().ephemeral(true))
}

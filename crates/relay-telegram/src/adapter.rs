//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event loop
//! until the process exits.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use relay_agent::pipeline::{CommandRegistry, CommandSpec};
use relay_core::config::TelegramConfig;

use crate::context::TelegramAppContext;
use crate::error::TelegramError;
use crate::handler::handle_message;

/// Commands this adapter answers.
pub fn registry() -> CommandRegistry {
    CommandRegistry::new()
        .with(CommandSpec::start())
        .with(CommandSpec::call())
        .with(CommandSpec::ask())
}

/// Telegram channel adapter. Long polling, so no public URL is required.
pub struct TelegramAdapter<C: TelegramAppContext + 'static> {
    ctx: Arc<C>,
    config: TelegramConfig,
}

impl<C: TelegramAppContext + 'static> TelegramAdapter<C> {
    pub fn new(config: &TelegramConfig, ctx: Arc<C>) -> Self {
        Self {
            ctx,
            config: config.clone(),
        }
    }

    /// Drive the long-polling dispatcher. Teloxide retries transport errors itself.
    pub async fn run(self) -> Result<(), TelegramError> {
        if self.config.bot_token.trim().is_empty() {
            return Err(TelegramError::NoToken);
        }

        let bot = Bot::new(&self.config.bot_token);
        let commands = Arc::new(registry());

        info!(commands = commands.len(), "Telegram: starting long-polling dispatcher");

        let ctx = Arc::clone(&self.ctx);
        let handler = Update::filter_message().endpoint(handle_message::<C>);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![ctx, commands])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

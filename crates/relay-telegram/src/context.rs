//! Telegram context interface, re-exported from the shared pipeline.

pub use relay_agent::pipeline::RelayContext as TelegramAppContext;

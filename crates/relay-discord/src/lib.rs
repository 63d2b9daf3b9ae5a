pub mod adapter;
pub mod commands;
pub mod context;
pub mod error;
pub mod handler;
pub mod modal;
pub mod send;

pub use adapter::DiscordAdapter;
pub use context::DiscordAppContext;
pub use error::DiscordError;
pub use send::DISCORD_MESSAGE_LIMIT;

//! Shared, channel-agnostic relay pipeline.
//!
//! Channel adapters parse their platform's events, build a `ChannelSink`, and
//! call `relay_completion`; the command table keeps each adapter's
//! name → handler mapping explicit.

pub mod commands;
pub mod context;
pub mod relay;

pub use commands::{
    greeting, parse_invocation, plan, Command, CommandRegistry, CommandSpec, Invocation, Outcome,
    WELCOME,
};
pub use context::RelayContext;
pub use relay::{answer, relay_completion, THINKING};

//! Discord context interface, re-exported from the shared pipeline.
//!
//! Every channel adapter is generic over the same `RelayContext` trait from
//! `relay-agent`; the alias keeps call sites in this crate readable.

pub use relay_agent::pipeline::RelayContext as DiscordAppContext;

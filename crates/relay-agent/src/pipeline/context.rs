//! Shared context interface for all channel adapters.

use crate::provider::CompletionProvider;

/// Minimal context interface required by the relay pipeline.
///
/// Implemented by `AppState` in `relay-gateway`. Holds only read-only,
/// startup-built collaborators so every event task can share it behind `Arc`.
pub trait RelayContext: Send + Sync {
    fn completion(&self) -> &dyn CompletionProvider;
}

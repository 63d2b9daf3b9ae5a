use relay_agent::pipeline::RelayContext;
use relay_agent::CompletionProvider;
use relay_core::config::ChannelsConfig;
use relay_core::{ChannelKind, RelayConfig};

/// Shared, read-only state handed to every channel adapter.
pub struct AppState {
    pub config: RelayConfig,
    completion: Box<dyn CompletionProvider>,
}

impl AppState {
    pub fn new(config: RelayConfig, completion: Box<dyn CompletionProvider>) -> Self {
        Self { config, completion }
    }
}

impl RelayContext for AppState {
    fn completion(&self) -> &dyn CompletionProvider {
        self.completion.as_ref()
    }
}

/// Which adapters to start.
///
/// An empty request means every channel. Channels without configuration are
/// dropped and reported in the second list.
pub fn select_channels(
    requested: &[ChannelKind],
    channels: &ChannelsConfig,
) -> (Vec<ChannelKind>, Vec<ChannelKind>) {
    let wanted: Vec<ChannelKind> = if requested.is_empty() {
        ChannelKind::ALL.to_vec()
    } else {
        ChannelKind::ALL
            .into_iter()
            .filter(|k| requested.contains(k))
            .collect()
    };

    wanted.into_iter().partition(|kind| match kind {
        ChannelKind::Discord => channels.discord.is_some(),
        ChannelKind::Telegram => channels.telegram.is_some(),
        ChannelKind::Twitter => channels.twitter.is_some(),
    })
}

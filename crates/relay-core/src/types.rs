use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// The chat platforms a relay adapter can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Discord,
    Telegram,
    Twitter,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [
        ChannelKind::Discord,
        ChannelKind::Telegram,
        ChannelKind::Twitter,
    ];

    /// Stable lowercase identifier used in logs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Discord => "discord",
            ChannelKind::Telegram => "telegram",
            ChannelKind::Twitter => "twitter",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discord" => Ok(ChannelKind::Discord),
            "telegram" => Ok(ChannelKind::Telegram),
            // X is the platform's current name; accept both.
            "twitter" | "x" => Ok(ChannelKind::Twitter),
            other => Err(RelayError::UnknownChannel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_channels_case_insensitively() {
        assert_eq!("Discord".parse::<ChannelKind>().unwrap(), ChannelKind::Discord);
        assert_eq!(" telegram ".parse::<ChannelKind>().unwrap(), ChannelKind::Telegram);
        assert_eq!("x".parse::<ChannelKind>().unwrap(), ChannelKind::Twitter);
    }

    #[test]
    fn rejects_unknown_channel() {
        let err = "slack".parse::<ChannelKind>().unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_CHANNEL");
    }

    #[test]
    fn display_matches_as_str() {
        for kind in ChannelKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown channel: {0}")]
    UnknownChannel(String),
}

impl RelayError {
    /// Short error code string used in structured log fields.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Config(_) => "CONFIG_ERROR",
            RelayError::UnknownChannel(_) => "UNKNOWN_CHANNEL",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_messages() {
        let err = RelayError::Config("bad toml".into());
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert_eq!(err.to_string(), "Configuration error: bad toml");

        let err = RelayError::UnknownChannel("irc".into());
        assert_eq!(err.code(), "UNKNOWN_CHANNEL");
        assert_eq!(err.to_string(), "Unknown channel: irc");
    }
}

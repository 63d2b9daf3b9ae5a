// Config loading against real files and env vars, isolated by figment's Jail.

use figment::Jail;
use relay_core::RelayConfig;

#[test]
fn toml_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relay.toml",
            r#"
                [completion]
                api_key = "sk-file"
                model = "openai/gpt-3.5-turbo-instruct"
                max_tokens = 256

                [channels.telegram]
                bot_token = "tg-file"

                [channels.discord]
                bot_token = "dc-file"
                application_id = 42
            "#,
        )?;

        let config = RelayConfig::load(Some("relay.toml")).expect("config loads");
        assert_eq!(config.completion.api_key, "sk-file");
        assert_eq!(config.completion.model, "openai/gpt-3.5-turbo-instruct");
        assert_eq!(config.completion.max_tokens, 256);
        // Unset keys keep their defaults.
        assert_eq!(config.completion.temperature, 1.0);
        assert_eq!(config.completion.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.channels.telegram.unwrap().bot_token, "tg-file");
        assert_eq!(config.channels.discord.unwrap().application_id, Some(42));
        assert!(config.channels.twitter.is_none());
        Ok(())
    });
}

#[test]
fn relay_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relay.toml",
            r#"
                [completion]
                model = "from-file"
            "#,
        )?;
        jail.set_env("RELAY_COMPLETION__MODEL", "from-env");
        jail.set_env("RELAY_CHANNELS__TELEGRAM__BOT_TOKEN", "tg-env");

        let config = RelayConfig::load(Some("relay.toml")).expect("config loads");
        assert_eq!(config.completion.model, "from-env");
        assert_eq!(config.channels.telegram.unwrap().bot_token, "tg-env");
        Ok(())
    });
}

#[test]
fn legacy_env_names_are_honoured() {
    Jail::expect_with(|jail| {
        jail.set_env("OPEN_ROUTER_API_KEY", "sk-legacy");
        jail.set_env("TWITTER_API_KEY", "consumer");
        jail.set_env("TWITTER_ACCESS_TOKEN", "token");

        let config = RelayConfig::load(Some("missing.toml")).expect("config loads");
        assert_eq!(config.completion.api_key, "sk-legacy");
        let twitter = config.channels.twitter.expect("twitter configured from env");
        assert_eq!(twitter.api_key, "consumer");
        assert_eq!(twitter.access_token, "token");
        assert_eq!(twitter.api_base_url, "https://api.twitter.com");
        Ok(())
    });
}

#[test]
fn malformed_file_is_a_config_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "relay.toml",
            r#"
                [completion]
                max_tokens = "lots"
            "#,
        )?;

        let err = RelayConfig::load(Some("relay.toml")).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
        Ok(())
    });
}

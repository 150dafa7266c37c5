//! Process-wide configuration read once from the environment at startup.

use std::env;
use std::fmt;

use thiserror::Error;

use crate::commands::coinmarketcap::API;

/// Prefix used for text commands when `COMMAND_PREFIX` is unset.
pub const DEFAULT_PREFIX: &str = "!";

const DISCORD_TOKEN: &str = "DISCORD_TOKEN";
const DISCORD_GUILD: &str = "DISCORD_GUILD";
const COINMARKETCAP_API_KEY: &str = "COINMARKETCAP_API_KEY";
const COINMARKETCAP_API_URL: &str = "COINMARKETCAP_API_URL";
const COMMAND_PREFIX: &str = "COMMAND_PREFIX";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
}

/// Immutable bot configuration. Built once in `main` and handed out by reference.
#[derive(Clone)]
pub struct Config {
    /// Discord bot token.
    pub discord_token: String,
    /// Name of the guild the bot expects to be a member of.
    pub guild_name: String,
    /// CoinMarketCap pro API key.
    pub cmc_api_key: String,
    /// Base URL of the quote API; points at the sandbox host for testing.
    pub cmc_base_url: String,
    /// Text command prefix.
    pub prefix: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("discord_token", &"<redacted>")
            .field("guild_name", &self.guild_name)
            .field("cmc_api_key", &"<redacted>")
            .field("cmc_base_url", &self.cmc_base_url)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            discord_token: require(DISCORD_TOKEN)?,
            guild_name: require(DISCORD_GUILD)?,
            cmc_api_key: require(COINMARKETCAP_API_KEY)?,
            cmc_base_url: get(COINMARKETCAP_API_URL).unwrap_or_else(|| API.to_owned()),
            prefix: get(COMMAND_PREFIX).unwrap_or_else(|| DEFAULT_PREFIX.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DISCORD_TOKEN", "token"),
        ("DISCORD_GUILD", "Crypto Talk"),
        ("COINMARKETCAP_API_KEY", "cmc-key"),
    ];

    #[test]
    fn test_required_values_with_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.guild_name, "Crypto Talk");
        assert_eq!(config.cmc_api_key, "cmc-key");
        assert_eq!(config.cmc_base_url, API);
        assert_eq!(config.prefix, DEFAULT_PREFIX);
    }

    #[test]
    fn test_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("COINMARKETCAP_API_URL", "https://sandbox-api.coinmarketcap.com/"));
        pairs.push(("COMMAND_PREFIX", "$"));

        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.cmc_base_url, "https://sandbox-api.coinmarketcap.com/");
        assert_eq!(config.prefix, "$");
    }

    #[test]
    fn test_missing_variable_is_reported_by_name() {
        let result = Config::from_lookup(lookup(&REQUIRED[..2]));

        assert_matches!(result, Err(ConfigError::Missing("COINMARKETCAP_API_KEY")));
    }

    #[test]
    fn test_blank_variable_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("DISCORD_TOKEN", "   ");

        let result = Config::from_lookup(lookup(&pairs));

        assert_matches!(result, Err(ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

        let printed = format!("{config:?}");

        assert!(printed.contains("Crypto Talk"));
        assert!(!printed.contains("\"token\""));
        assert!(!printed.contains("cmc-key"));
    }
}

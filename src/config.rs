use std::env;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_CHAT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "openai/gpt-3.5-turbo";
const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Connection settings for the text-generation service.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub chat: ChatSettings,
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let port = or_default("PORT", "8080");
        let port = port.parse().map_err(|_| ConfigError::Invalid {
            name: "PORT",
            expected: "a valid port number",
            value: port.clone(),
        })?;

        let timeout = or_default("CHAT_TIMEOUT_SECS", &DEFAULT_CHAT_TIMEOUT_SECS.to_string());
        let timeout = timeout
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "CHAT_TIMEOUT_SECS",
                expected: "a positive number of seconds",
                value: timeout.clone(),
            })?;

        Ok(Config {
            database_url,
            host: or_default("HOST", "0.0.0.0"),
            port,
            chat: ChatSettings {
                api_url: or_default("CHAT_API_URL", DEFAULT_CHAT_API_URL),
                api_key: or_default("OPENROUTER_API_KEY", ""),
                model: or_default("CHAT_MODEL", DEFAULT_CHAT_MODEL),
                timeout: Duration::from_secs(timeout),
            },
        })
    }
}

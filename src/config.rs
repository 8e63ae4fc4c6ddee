use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::modules::server::auth::AdminList;

const DEFAULT_PANEL_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process-wide settings, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub guild_id: u64,

    pub panel_url: String,
    pub api_key: String,
    pub server_id: String,
    pub panel_timeout: Duration,

    pub admins: AdminList,

    pub bind: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().trim_matches('"').to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let guild_id = parse("GUILD_ID", &required("GUILD_ID")?)?;

        let panel_timeout = match get("PANEL_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse("PANEL_TIMEOUT_SECS", &v)?),
            None => Duration::from_secs(DEFAULT_PANEL_TIMEOUT_SECS),
        };

        let port = match get("PORT") {
            Some(v) => parse("PORT", &v)?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token: required("DISCORD_BOT_TOKEN")?,
            guild_id,
            panel_url: required("PANEL_URL")?.trim_end_matches('/').to_string(),
            api_key: required("PTERODACTYL_API_KEY")?,
            server_id: required("SERVER_ID")?,
            panel_timeout,
            admins: parse_admins(&get("ADMIN_IDS").unwrap_or_default())?,
            bind: get("BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_admins(raw: &str) -> Result<AdminList, ConfigError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| parse("ADMIN_IDS", id))
        .collect::<Result<HashSet<u64>, _>>()?;

    Ok(AdminList::new(ids))
}

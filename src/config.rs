use crate::error::{config::ConfigError, AppError};

/// Shortest restriction a staff member may apply, in seconds.
///
/// Matches the reconciliation cadence so no timed restriction can expire
/// between two sweeps without ever being eligible for one.
pub const DEFAULT_MIN_RESTRICTION_SECS: i64 = 600;

/// Longest restriction a staff member may apply: one week.
pub const DEFAULT_MAX_RESTRICTION_SECS: i64 = 7 * 24 * 60 * 60;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub guild_id: u64,
    pub muted_role_id: u64,

    pub min_restriction_secs: i64,
    pub max_restriction_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            guild_id: require_u64("GUILD_ID")?,
            muted_role_id: require_u64("MUTED_ROLE_ID")?,
            min_restriction_secs: optional_i64(
                "MIN_RESTRICTION_SECS",
                DEFAULT_MIN_RESTRICTION_SECS,
            )?,
            max_restriction_secs: optional_i64(
                "MAX_RESTRICTION_SECS",
                DEFAULT_MAX_RESTRICTION_SECS,
            )?,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn require_u64(name: &str) -> Result<u64, ConfigError> {
    let value = require(name)?;
    value.parse().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value,
    })
}

fn optional_i64(name: &str, default: i64) -> Result<i64, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

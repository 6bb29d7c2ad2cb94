use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Runtime settings, read once from the environment (and `.env`) at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub secret: String,
    pub bind_addr: String,
    pub token_ttl_hours: i64,
    pub seed: SeedConfig,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub enabled: bool,
    pub admin_password: String,
    pub user_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            database_url: required("DATABASE_URL")?,
            secret: required("SECRET")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            token_ttl_hours: check_token_ttl(parsed("TOKEN_TTL_HOURS", 24)?)?,
            seed: SeedConfig {
                enabled: parsed("SEED_SAMPLE_DATA", true)?,
                admin_password: env::var("SEED_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "Admin12345678".to_string()),
                user_password: env::var("SEED_USER_PASSWORD")
                    .unwrap_or_else(|_| "User12345678".to_string()),
            },
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

/// Token lifetime in hours; must be positive and small enough to add to the
/// current time.
pub fn check_token_ttl(hours: i64) -> Result<i64, ConfigError> {
    if hours <= 0 || chrono::Duration::try_hours(hours).is_none() {
        return Err(ConfigError::Invalid {
            name: "TOKEN_TTL_HOURS",
            value: hours.to_string(),
        });
    }
    Ok(hours)
}

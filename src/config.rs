use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let admin_password = var("ADMIN_PASSWORD").unwrap_or_else(|_| {
            warn!("ADMIN_PASSWORD not set, falling back to the default password; change it!");
            DEFAULT_ADMIN_PASSWORD.to_string()
        });

        Ok(Self {
            port: try_load("NOMADEN_PORT", "8080")?,
            data_file: try_load("NOMADEN_DATA", "data/appointments.json")?,
            static_dir: try_load("NOMADEN_STATIC", "static")?,
            admin_password,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid { key: key.to_string(), message: e.to_string() }
        })
}

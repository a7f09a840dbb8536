use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::JotterError;

/// Runtime configuration, sourced from defaults overlaid with environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub port: u16,
    pub loglevel: String,
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:jotter.db".to_string(),
            listen_addr: "0.0.0.0".to_string(),
            port: 3000,
            loglevel: "info".to_string(),
            max_connections: 5,
        }
    }
}

impl Config {
    const ENV_KEYS: [&'static str; 5] = [
        "DATABASE_URL",
        "LISTEN_ADDR",
        "PORT",
        "LOGLEVEL",
        "MAX_CONNECTIONS",
    ];

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(&Self::ENV_KEYS))
    }

    pub fn load() -> Result<Self, JotterError> {
        Self::extract_from(Self::figment())
    }

    pub fn extract_from(figment: Figment) -> Result<Self, JotterError> {
        Ok(figment.extract()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen_addr, self.port)
    }
}

use seatline_catalog::RouteTable;
use seatline_core::{RoleEntry, RoleTable, TokenIssuer};
use seatline_shared::Route;
use serde::Deserialize;
use std::env;
use std::path::Path;
use std::time::Duration;

pub use config::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    pub train: TrainConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_port() -> u16 { 50051 }

fn default_request_timeout_ms() -> u64 { 5000 }

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    /// Token lifetime in seconds.
    pub expire: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrainConfig {
    pub sections: Vec<String>,
    pub seat_count: u32,
    pub routes: Vec<Route>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SEATLINE__AUTH__SECRET_KEY=...`
            .add_source(config::Environment::with_prefix("SEATLINE").separator("__"))
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        tracing::debug!(run_mode = %run_mode, routes = config.train.routes.len(), "Configuration loaded");
        Ok(config)
    }

    /// Loads `path` when given, otherwise falls back to [`Config::load`].
    /// `SEATLINE__*` environment variables still override the file.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Self::load();
        };

        let config: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("SEATLINE").separator("__"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        tracing::debug!(path = %path.display(), routes = config.train.routes.len(), "Configuration loaded");
        Ok(config)
    }

    /// Loads a single file; the format follows its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret_key.is_empty() {
            return Err(invalid("auth.secret_key must not be empty"));
        }
        if self.auth.expire == 0 {
            return Err(invalid("auth.expire must be greater than zero"));
        }
        self.route_table().map(|_| ())
    }

    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        RouteTable::new(
            self.train.routes.clone(),
            self.train.sections.clone(),
            self.train.seat_count,
        )
        .map_err(|e| invalid(&format!("train: {}", e)))
    }

    pub fn role_table(&self) -> RoleTable {
        RoleTable::new(self.roles.clone())
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer::new(&self.auth.secret_key, self.auth.expire, self.role_table())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Message(message.to_string())
}

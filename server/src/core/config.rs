use dotenv::dotenv;
use std::env;
use std::str::FromStr;
use tracing::{info, warn};

/// Which document store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    MySql,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "mysql" => Ok(StoreBackend::MySql),
            other => Err(format!(
                "Invalid STORE_BACKEND '{}': expected 'memory' or 'mysql'",
                other
            )),
        }
    }
}

/// Process configuration, built once in `main` and handed to whoever needs it
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            store_backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 10,
            connection_lifetime_secs: 1800,
            app_env: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads the configuration from the environment, loading `.env` first
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let defaults = Config::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?,
            None => defaults.server_port,
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(backend) => backend.parse::<StoreBackend>()?,
            None => defaults.store_backend,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store_backend == StoreBackend::MySql && database_url.is_none() {
            return Err("DATABASE_URL must be set when STORE_BACKEND=mysql".to_string());
        }

        let max_connections = match lookup("MAX_DB_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?,
            None => defaults.max_connections,
        };

        let connection_lifetime_secs = match lookup("DB_CONNECTION_LIFETIME_SECS") {
            Some(value) => value.parse::<u64>().map_err(|_| {
                "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number".to_string()
            })?,
            None => defaults.connection_lifetime_secs,
        };

        let app_env = lookup("APP_ENV").unwrap_or(defaults.app_env);
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            server_host,
            server_port,
            store_backend,
            database_url,
            max_connections,
            connection_lifetime_secs,
            app_env,
            log_level,
        })
    }

    /// Logs the configuration, hiding credentials
    pub fn print_info(&self) {
        info!("Environment: {}", self.app_env);
        info!("Server address: {}:{}", self.server_host, self.server_port);
        info!("Store backend: {:?}", self.store_backend);
        match &self.database_url {
            Some(url) => info!("Database: {}", Self::mask_url(url)),
            None if self.store_backend == StoreBackend::Memory => {
                warn!("Using the in-memory store, data is lost on shutdown")
            }
            None => {}
        }
        info!("Max DB connections: {}", self.max_connections);
        info!("Connection lifetime: {}s", self.connection_lifetime_secs);
    }

    /// Replaces the credentials part of a database URL
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        "***".to_string()
    }
}

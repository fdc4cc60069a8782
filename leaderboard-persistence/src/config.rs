use std::env;
use std::str::FromStr;
use std::time::Duration;

use sea_orm::{ConnectOptions, IsolationLevel};

const DEFAULT_DATABASE_URL: &str = "sqlite://leaderboard.db?mode=rwc";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// How player ranks are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankingMode {
    /// `ROW_NUMBER()` window evaluated by the engine.
    #[default]
    Window,
    /// The whole leaderboard is fetched in rank order and numbered in
    /// process. Costs O(players in the leaderboard) per query; meant for
    /// engines without window functions.
    Application,
}

impl FromStr for RankingMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "window" => Ok(Self::Window),
            "application" | "app" => Ok(Self::Application),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub connect_timeout: Option<Duration>,
    pub acquire_timeout: Option<Duration>,
    pub sql_logging: bool,
    pub ranking_mode: RankingMode,
    /// Isolation level for the cascading leaderboard delete. `None` keeps
    /// the engine default.
    pub isolation_level: Option<IsolationLevel>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: None,
            connect_timeout: None,
            acquire_timeout: None,
            sql_logging: false,
            ranking_mode: RankingMode::default(),
            isolation_level: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            url,
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS")?,
            connect_timeout: parse_var("DATABASE_CONNECT_TIMEOUT_SECONDS")?
                .map(Duration::from_secs),
            acquire_timeout: parse_var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")?
                .map(Duration::from_secs),
            sql_logging: parse_var("DATABASE_SQL_LOGGING")?.unwrap_or(false),
            ranking_mode: parse_var("LEADERBOARD_RANKING_MODE")?.unwrap_or_default(),
            isolation_level: None,
        })
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        if let Some(max) = self.max_connections {
            options.max_connections(max);
        }
        if let Some(timeout) = self.connect_timeout {
            options.connect_timeout(timeout);
        }
        if let Some(timeout) = self.acquire_timeout {
            options.acquire_timeout(timeout);
        }
        options.sqlx_logging(self.sql_logging);
        options
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_URL)
    }
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        Err(_) => Ok(None),
    }
}

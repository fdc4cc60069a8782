pub mod config;
pub mod connection;
pub mod entities;
pub mod error;
pub mod memory;
pub mod ranking;
pub mod repositories;

pub use config::{ConfigError, DatabaseConfig, RankingMode};
pub use error::{ConnectionError, StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use repositories::{LeaderboardRepository, LeaderboardStore, PlayerRepository, PlayerStore};

use sea_orm::{DatabaseConnection, DbErr};

/// Owns the connection and hands out stores configured from one
/// [`DatabaseConfig`]. Stores share the underlying pool.
pub struct DatabaseManager {
    connection: DatabaseConnection,
    config: DatabaseConfig,
}

impl DatabaseManager {
    pub async fn connect(config: DatabaseConfig) -> Result<Self, DbErr> {
        let connection = connection::connect(&config).await?;
        Ok(Self { connection, config })
    }

    pub fn from_connection(connection: DatabaseConnection, config: DatabaseConfig) -> Self {
        Self { connection, config }
    }

    pub fn get_connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn player_repository(&self) -> PlayerRepository {
        PlayerRepository::with_ranking_mode(self.connection.clone(), self.config.ranking_mode)
    }

    pub fn leaderboard_repository(&self) -> LeaderboardRepository {
        LeaderboardRepository::new(self.connection.clone())
            .with_isolation_level(self.config.isolation_level)
    }
}

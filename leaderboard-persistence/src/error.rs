use sea_orm::DbErr;
use uuid::Uuid;

use crate::config::ConfigError;

/// Failures surfaced by the leaderboard and player stores.
///
/// Lookups keyed by identity that match nothing are reclassified into the
/// `*NotFound` variants, keeping the engine's message as `cause`. Every other
/// engine failure passes through untouched as [`StoreError::Db`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("leaderboard not found (id {id}): {cause}")]
    LeaderboardNotFound { id: Uuid, cause: String },

    /// `id` is the player's, except when a leaderboard delete finds fewer
    /// players to remove than it counted; then it is the leaderboard's.
    #[error("player not found (id {id}): {cause}")]
    PlayerNotFound { id: Uuid, cause: String },

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    pub fn leaderboard_not_found(id: Uuid, cause: impl ToString) -> Self {
        Self::LeaderboardNotFound {
            id,
            cause: cause.to_string(),
        }
    }

    pub fn player_not_found(id: Uuid, cause: impl ToString) -> Self {
        Self::PlayerNotFound {
            id,
            cause: cause.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::LeaderboardNotFound { .. } | Self::PlayerNotFound { .. }
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Failures from connecting with environment configuration: either the
/// settings could not be read or the engine refused the connection.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// The engine-level error recorded as the cause when a keyed statement
/// matched no row.
pub(crate) fn no_rows(table: &str) -> DbErr {
    DbErr::RecordNotFound(format!("no rows in {table} matched the primary key"))
}

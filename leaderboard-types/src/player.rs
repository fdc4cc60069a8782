use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::LeaderboardId;

pub type PlayerId = Uuid;
pub type Score = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Player {
    pub id: PlayerId,
    pub leaderboard_id: LeaderboardId,
    pub name: String,
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Builds a player that has not been stored yet. The store assigns the id
    /// and stamps both timestamps on insert.
    pub fn new(leaderboard_id: LeaderboardId, name: impl Into<String>, score: Score) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            leaderboard_id,
            name: name.into(),
            score,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_unsaved(&self) -> bool {
        self.id.is_nil()
    }
}

/// A player together with its 1-based position inside its leaderboard.
/// Rank is computed on read and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub rank: i64,
}

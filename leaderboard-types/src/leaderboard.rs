use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub type LeaderboardId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Leaderboard {
    pub id: LeaderboardId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Leaderboard {
    /// A leaderboard that has not been stored yet. The nil id tells the store
    /// to assign a fresh identity on insert.
    pub fn unsaved() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_unsaved(&self) -> bool {
        self.id.is_nil()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::unsaved()
    }
}

pub mod leaderboard_repository;
pub mod player_repository;

pub use leaderboard_repository::LeaderboardRepository;
pub use player_repository::PlayerRepository;

use async_trait::async_trait;
use leaderboard_types::{Leaderboard, LeaderboardId, Player, PlayerId, RankedPlayer};

use crate::error::StoreResult;

/// Player records and ranked queries over them.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Whether any player, in any leaderboard, already uses `name`.
    async fn exists(&self, name: &str) -> StoreResult<bool>;

    async fn get_by_pk(&self, id: PlayerId) -> StoreResult<Player>;

    /// The player with its rank inside its whole leaderboard.
    async fn get_ranked_by_pk(&self, id: PlayerId) -> StoreResult<RankedPlayer>;

    /// One page of a leaderboard in rank order. An unknown or empty
    /// leaderboard yields an empty page.
    async fn list(
        &self,
        leaderboard_id: LeaderboardId,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<RankedPlayer>>;

    /// Inserts `player`, assigning an id when it has none and stamping both
    /// timestamps. Returns the stored record.
    async fn create(&self, player: &Player) -> StoreResult<Player>;

    /// Writes `player.score` and bumps `updated_at`. Nothing else changes.
    async fn update_score(&self, player: &Player) -> StoreResult<()>;

    async fn delete(&self, player: &Player) -> StoreResult<()>;
}

/// Leaderboard records. Deleting a leaderboard removes its players with it.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    async fn get_by_pk(&self, id: LeaderboardId) -> StoreResult<Leaderboard>;

    async fn list(&self) -> StoreResult<Vec<Leaderboard>>;

    async fn create(&self, leaderboard: &Leaderboard) -> StoreResult<Leaderboard>;

    /// Removes every player of the leaderboard and then the leaderboard, as
    /// one unit. On failure nothing is removed.
    async fn delete(&self, leaderboard: &Leaderboard) -> StoreResult<()>;
}

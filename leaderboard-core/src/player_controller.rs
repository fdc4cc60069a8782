use leaderboard_persistence::{LeaderboardStore, PlayerStore};
use leaderboard_types::{LeaderboardId, Player, PlayerId, RankedPlayer, Score};

use crate::errors::PlayerControllerError;

/// Largest page `list` will return.
pub const MAX_PAGE_SIZE: u64 = 100;

pub type PlayerResult<T> = Result<T, PlayerControllerError>;

/// Entry point for player operations. Needs the leaderboard store to check
/// that a target leaderboard exists before touching its players.
pub struct PlayerController<P, L> {
    players: P,
    leaderboards: L,
}

impl<P: PlayerStore, L: LeaderboardStore> PlayerController<P, L> {
    pub fn new(players: P, leaderboards: L) -> Self {
        Self {
            players,
            leaderboards,
        }
    }

    /// Adds a player to a leaderboard. Names are unique across every
    /// leaderboard.
    pub async fn create(
        &self,
        leaderboard_id: LeaderboardId,
        name: &str,
        score: Score,
    ) -> PlayerResult<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlayerControllerError::InvalidName);
        }

        self.leaderboards.get_by_pk(leaderboard_id).await?;

        // The unique index on players.name still backs this up if two
        // creates race past the check.
        if self.players.exists(name).await? {
            return Err(PlayerControllerError::NameTaken {
                name: name.to_string(),
            });
        }

        let player = self
            .players
            .create(&Player::new(leaderboard_id, name, score))
            .await?;
        tracing::info!(player_id = %player.id, %leaderboard_id, "player joined leaderboard");
        Ok(player)
    }

    pub async fn get(&self, player_id: PlayerId) -> PlayerResult<Player> {
        Ok(self.players.get_by_pk(player_id).await?)
    }

    pub async fn get_ranked(&self, player_id: PlayerId) -> PlayerResult<RankedPlayer> {
        Ok(self.players.get_ranked_by_pk(player_id).await?)
    }

    /// One page of the leaderboard in rank order; `limit` is capped at
    /// [`MAX_PAGE_SIZE`].
    pub async fn list(
        &self,
        leaderboard_id: LeaderboardId,
        limit: u64,
        offset: u64,
    ) -> PlayerResult<Vec<RankedPlayer>> {
        self.leaderboards.get_by_pk(leaderboard_id).await?;

        let limit = limit.min(MAX_PAGE_SIZE);
        Ok(self.players.list(leaderboard_id, limit, offset).await?)
    }

    pub async fn update_score(&self, player_id: PlayerId, score: Score) -> PlayerResult<Player> {
        let mut player = self.players.get_by_pk(player_id).await?;
        player.score = score;
        self.players.update_score(&player).await?;

        Ok(self.players.get_by_pk(player_id).await?)
    }

    pub async fn remove(&self, player_id: PlayerId) -> PlayerResult<()> {
        let player = self.players.get_by_pk(player_id).await?;
        self.players.delete(&player).await?;
        tracing::info!(%player_id, "player removed");
        Ok(())
    }
}

use leaderboard_persistence::{LeaderboardStore, StoreResult};
use leaderboard_types::{Leaderboard, LeaderboardId};

/// Entry point for leaderboard operations. Errors from the store are passed
/// through unchanged.
pub struct LeaderboardController<S> {
    store: S,
}

impl<S: LeaderboardStore> LeaderboardController<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> StoreResult<Vec<Leaderboard>> {
        self.store.list().await
    }

    pub async fn get(&self, leaderboard_id: LeaderboardId) -> StoreResult<Leaderboard> {
        self.store.get_by_pk(leaderboard_id).await
    }

    /// Creates an empty leaderboard; the store picks its id.
    pub async fn create(&self) -> StoreResult<Leaderboard> {
        let leaderboard = self.store.create(&Leaderboard::unsaved()).await?;
        tracing::info!(leaderboard_id = %leaderboard.id, "leaderboard created");
        Ok(leaderboard)
    }

    /// Deletes the leaderboard and every player in it.
    pub async fn remove(&self, leaderboard_id: LeaderboardId) -> StoreResult<()> {
        let leaderboard = self.get(leaderboard_id).await?;
        self.store.delete(&leaderboard).await?;
        tracing::info!(%leaderboard_id, "leaderboard removed");
        Ok(())
    }
}

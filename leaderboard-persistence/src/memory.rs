//! Process-local store implementing both store traits, for tests and
//! embedding. All state sits behind one lock, so the cascading delete is
//! atomic with respect to every other call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult, no_rows};
use crate::ranking;
use crate::repositories::{LeaderboardStore, PlayerStore};
use leaderboard_types::{Leaderboard, LeaderboardId, Player, PlayerId, RankedPlayer};

#[derive(Default)]
struct MemoryState {
    leaderboards: HashMap<LeaderboardId, Leaderboard>,
    players: HashMap<PlayerId, Player>,
}

impl MemoryState {
    fn partition(&self, leaderboard_id: LeaderboardId) -> Vec<RankedPlayer> {
        ranking::rank_partition(
            self.players
                .values()
                .filter(|player| player.leaderboard_id == leaderboard_id)
                .cloned()
                .collect(),
        )
    }
}

/// Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn player_count(&self) -> usize {
        self.state.read().await.players.len()
    }
}

#[async_trait]
impl PlayerStore for InMemoryStore {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.players.values().any(|player| player.name == name))
    }

    async fn get_by_pk(&self, id: PlayerId) -> StoreResult<Player> {
        let state = self.state.read().await;
        state
            .players
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::player_not_found(id, no_rows("players")))
    }

    async fn get_ranked_by_pk(&self, id: PlayerId) -> StoreResult<RankedPlayer> {
        let state = self.state.read().await;
        let player = state
            .players
            .get(&id)
            .ok_or_else(|| StoreError::player_not_found(id, no_rows("players")))?;

        state
            .partition(player.leaderboard_id)
            .into_iter()
            .find(|ranked| ranked.player.id == id)
            .ok_or_else(|| StoreError::player_not_found(id, no_rows("players")))
    }

    async fn list(
        &self,
        leaderboard_id: LeaderboardId,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<RankedPlayer>> {
        let state = self.state.read().await;
        Ok(ranking::page(state.partition(leaderboard_id), limit, offset))
    }

    async fn create(&self, player: &Player) -> StoreResult<Player> {
        let mut state = self.state.write().await;

        let id = if player.is_unsaved() {
            Uuid::new_v4()
        } else {
            player.id
        };

        // Same constraints the relational schema enforces
        if state.players.contains_key(&id) {
            return Err(DbErr::Custom(format!("duplicate primary key players.id = {id}")).into());
        }
        if state.players.values().any(|p| p.name == player.name) {
            return Err(DbErr::Custom(format!("duplicate players.name = {}", player.name)).into());
        }
        if !state.leaderboards.contains_key(&player.leaderboard_id) {
            return Err(DbErr::Custom(format!(
                "foreign key violation: no leaderboard {}",
                player.leaderboard_id
            ))
            .into());
        }

        let now = Utc::now();
        let created = Player {
            id,
            created_at: now,
            updated_at: now,
            ..player.clone()
        };
        state.players.insert(id, created.clone());
        Ok(created)
    }

    async fn update_score(&self, player: &Player) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let stored = state
            .players
            .get_mut(&player.id)
            .ok_or_else(|| StoreError::player_not_found(player.id, no_rows("players")))?;

        stored.score = player.score;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, player: &Player) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .players
            .remove(&player.id)
            .map(|_| ())
            .ok_or_else(|| StoreError::player_not_found(player.id, no_rows("players")))
    }
}

#[async_trait]
impl LeaderboardStore for InMemoryStore {
    async fn get_by_pk(&self, id: LeaderboardId) -> StoreResult<Leaderboard> {
        let state = self.state.read().await;
        state
            .leaderboards
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::leaderboard_not_found(id, no_rows("leaderboards")))
    }

    async fn list(&self) -> StoreResult<Vec<Leaderboard>> {
        let state = self.state.read().await;
        let mut leaderboards: Vec<_> = state.leaderboards.values().cloned().collect();
        leaderboards.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(leaderboards)
    }

    async fn create(&self, leaderboard: &Leaderboard) -> StoreResult<Leaderboard> {
        let mut state = self.state.write().await;

        let id = if leaderboard.is_unsaved() {
            Uuid::new_v4()
        } else {
            leaderboard.id
        };
        if state.leaderboards.contains_key(&id) {
            return Err(
                DbErr::Custom(format!("duplicate primary key leaderboards.id = {id}")).into(),
            );
        }

        let now = Utc::now();
        let created = Leaderboard {
            id,
            created_at: now,
            updated_at: now,
        };
        state.leaderboards.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, leaderboard: &Leaderboard) -> StoreResult<()> {
        let mut state = self.state.write().await;

        // Check before touching anything so a failure leaves no trace
        if !state.leaderboards.contains_key(&leaderboard.id) {
            return Err(StoreError::leaderboard_not_found(
                leaderboard.id,
                no_rows("leaderboards"),
            ));
        }

        state
            .players
            .retain(|_, player| player.leaderboard_id != leaderboard.id);
        state.leaderboards.remove(&leaderboard.id);
        Ok(())
    }
}

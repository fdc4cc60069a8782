#![allow(dead_code)]

use leaderboard_core::{LeaderboardController, PlayerController};
use leaderboard_persistence::connection::connect_to_memory_database;
use leaderboard_persistence::{
    InMemoryStore, LeaderboardRepository, LeaderboardStore, PlayerRepository, PlayerStore,
    RankingMode,
};
use leaderboard_types::{Leaderboard, Player};
use migration::{Migrator, MigratorTrait};

/// Both controllers wired to the same backing store.
pub struct TestSetup<P, L> {
    pub leaderboards: LeaderboardController<L>,
    pub players: PlayerController<P, L>,
}

impl<P: PlayerStore, L: LeaderboardStore + Clone> TestSetup<P, L> {
    pub fn new(player_store: P, leaderboard_store: L) -> Self {
        Self {
            leaderboards: LeaderboardController::new(leaderboard_store.clone()),
            players: PlayerController::new(player_store, leaderboard_store),
        }
    }

    /// Creates a leaderboard holding the given `(name, score)` players, in
    /// order.
    pub async fn seed(&self, players: &[(&str, i64)]) -> (Leaderboard, Vec<Player>) {
        let leaderboard = self.leaderboards.create().await.unwrap();
        let mut created = Vec::new();
        for (name, score) in players {
            created.push(
                self.players
                    .create(leaderboard.id, name, *score)
                    .await
                    .unwrap(),
            );
        }
        (leaderboard, created)
    }
}

pub fn memory_setup() -> TestSetup<InMemoryStore, InMemoryStore> {
    let store = InMemoryStore::new();
    TestSetup::new(store.clone(), store)
}

pub async fn sqlite_setup(mode: RankingMode) -> TestSetup<PlayerRepository, LeaderboardRepository> {
    let db = connect_to_memory_database().await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    TestSetup::new(
        PlayerRepository::with_ranking_mode(db.clone(), mode),
        LeaderboardRepository::new(db),
    )
}

/// Player names in listing order.
pub fn names(ranked: &[leaderboard_types::RankedPlayer]) -> Vec<String> {
    ranked.iter().map(|r| r.player.name.clone()).collect()
}

pub fn ranks(ranked: &[leaderboard_types::RankedPlayer]) -> Vec<i64> {
    ranked.iter().map(|r| r.rank).collect()
}

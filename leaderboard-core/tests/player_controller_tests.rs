mod common;

use common::*;
use leaderboard_core::{MAX_PAGE_SIZE, PlayerControllerError};
use leaderboard_persistence::{LeaderboardStore, PlayerStore, RankingMode, StoreError};
use uuid::Uuid;

async fn check_ranking<P: PlayerStore, L: LeaderboardStore + Clone>(
    setup: TestSetup<P, L>,
) -> anyhow::Result<()> {
    let (leaderboard, players) = setup
        .seed(&[("A", 100), ("B", 200), ("C", 200), ("D", 50), ("E", 200)])
        .await;

    let listed = setup.players.list(leaderboard.id, 10, 0).await?;
    assert_eq!(names(&listed), vec!["B", "C", "E", "A", "D"]);
    assert_eq!(ranks(&listed), vec![1, 2, 3, 4, 5]);

    // Single lookups agree with the listing
    for player in &players {
        let ranked = setup.players.get_ranked(player.id).await?;
        let listed_rank = listed
            .iter()
            .find(|r| r.player.id == player.id)
            .map(|r| r.rank);
        assert_eq!(Some(ranked.rank), listed_rank);
    }

    Ok(())
}

async fn check_pages<P: PlayerStore, L: LeaderboardStore + Clone>(
    setup: TestSetup<P, L>,
) -> anyhow::Result<()> {
    let entries: Vec<(String, i64)> = (0..10).map(|i| (format!("p{}", i), (i * 7) % 4)).collect();
    let borrowed: Vec<(&str, i64)> = entries.iter().map(|(n, s)| (n.as_str(), *s)).collect();
    let (leaderboard, _) = setup.seed(&borrowed).await;

    let full = setup.players.list(leaderboard.id, 100, 0).await?;
    assert_eq!(full.len(), 10);
    assert!(full.windows(2).all(|w| w[0].player.score >= w[1].player.score));

    let mut stitched = Vec::new();
    for page in 0..4 {
        stitched.extend(setup.players.list(leaderboard.id, 3, page * 3).await?);
    }
    assert_eq!(stitched, full);

    Ok(())
}

async fn check_create_rules<P: PlayerStore, L: LeaderboardStore + Clone>(setup: TestSetup<P, L>) {
    let (leaderboard, _) = setup.seed(&[("alice", 1)]).await;

    let err = setup.players.create(leaderboard.id, "alice", 5).await.unwrap_err();
    assert!(matches!(err, PlayerControllerError::NameTaken { ref name } if name == "alice"));

    let err = setup.players.create(leaderboard.id, "   ", 5).await.unwrap_err();
    assert!(matches!(err, PlayerControllerError::InvalidName));

    let err = setup.players.create(Uuid::new_v4(), "bob", 5).await.unwrap_err();
    assert!(matches!(
        err,
        PlayerControllerError::Store(StoreError::LeaderboardNotFound { .. })
    ));

    // Names are unique across leaderboards too
    let other = setup.leaderboards.create().await.unwrap();
    let err = setup.players.create(other.id, "alice", 5).await.unwrap_err();
    assert!(matches!(err, PlayerControllerError::NameTaken { .. }));
}

async fn check_update_and_remove<P: PlayerStore, L: LeaderboardStore + Clone>(setup: TestSetup<P, L>) {
    let (leaderboard, players) = setup.seed(&[("low", 10), ("high", 20)]).await;
    let low = &players[0];

    let updated = setup.players.update_score(low.id, 30).await.unwrap();
    assert_eq!(updated.score, 30);
    assert_eq!(updated.name, low.name);
    assert_eq!(updated.leaderboard_id, low.leaderboard_id);
    assert_eq!(updated.created_at, low.created_at);
    assert!(updated.updated_at >= low.updated_at);
    assert_eq!(setup.players.get_ranked(low.id).await.unwrap().rank, 1);

    setup.players.remove(low.id).await.unwrap();
    assert!(setup.players.get(low.id).await.unwrap_err().is_not_found());
    assert!(setup.players.remove(low.id).await.unwrap_err().is_not_found());
    assert!(
        setup
            .players
            .update_score(low.id, 1)
            .await
            .unwrap_err()
            .is_not_found()
    );

    let remaining = setup.players.list(leaderboard.id, 10, 0).await.unwrap();
    assert_eq!(names(&remaining), vec!["high"]);
    assert_eq!(ranks(&remaining), vec![1]);
}

async fn check_list_rules<P: PlayerStore, L: LeaderboardStore + Clone>(setup: TestSetup<P, L>) {
    let err = setup.players.list(Uuid::new_v4(), 10, 0).await.unwrap_err();
    assert!(err.is_not_found());

    let (empty, _) = setup.seed(&[]).await;
    assert!(setup.players.list(empty.id, 10, 0).await.unwrap().is_empty());

    let entries: Vec<String> = (0..(MAX_PAGE_SIZE + 5)).map(|i| format!("bulk{}", i)).collect();
    let borrowed: Vec<(&str, i64)> = entries.iter().map(|n| (n.as_str(), 1)).collect();
    let (crowded, _) = setup.seed(&borrowed).await;

    let page = setup.players.list(crowded.id, 1_000, 0).await.unwrap();
    assert_eq!(page.len() as u64, MAX_PAGE_SIZE);
}

async fn check_far_offset<P: PlayerStore, L: LeaderboardStore + Clone>(setup: TestSetup<P, L>) {
    let (leaderboard, _) = setup.seed(&[("top", 9), ("bottom", 1)]).await;

    let page = setup.players.list(leaderboard.id, 10, u64::MAX).await.unwrap();
    assert!(page.is_empty());

    let page = setup.players.list(leaderboard.id, u64::MAX, 1).await.unwrap();
    assert_eq!(names(&page), vec!["bottom"]);
    assert_eq!(ranks(&page), vec![2]);
}

#[tokio::test]
async fn test_ranking_memory() -> anyhow::Result<()> {
    check_ranking(memory_setup()).await
}

#[tokio::test]
async fn test_ranking_sqlite_window() -> anyhow::Result<()> {
    check_ranking(sqlite_setup(RankingMode::Window).await).await
}

#[tokio::test]
async fn test_ranking_sqlite_application() -> anyhow::Result<()> {
    check_ranking(sqlite_setup(RankingMode::Application).await).await
}

#[tokio::test]
async fn test_pages_memory() -> anyhow::Result<()> {
    check_pages(memory_setup()).await
}

#[tokio::test]
async fn test_pages_sqlite() -> anyhow::Result<()> {
    check_pages(sqlite_setup(RankingMode::Window).await).await
}

#[tokio::test]
async fn test_create_rules_memory() {
    check_create_rules(memory_setup()).await;
}

#[tokio::test]
async fn test_create_rules_sqlite() {
    check_create_rules(sqlite_setup(RankingMode::Window).await).await;
}

#[tokio::test]
async fn test_update_and_remove_memory() {
    check_update_and_remove(memory_setup()).await;
}

#[tokio::test]
async fn test_update_and_remove_sqlite() {
    check_update_and_remove(sqlite_setup(RankingMode::Window).await).await;
}

#[tokio::test]
async fn test_list_rules_memory() {
    check_list_rules(memory_setup()).await;
}

#[tokio::test]
async fn test_list_rules_sqlite() {
    check_list_rules(sqlite_setup(RankingMode::Window).await).await;
}

#[tokio::test]
async fn test_far_offset_memory() {
    check_far_offset(memory_setup()).await;
}

#[tokio::test]
async fn test_far_offset_sqlite_window() {
    check_far_offset(sqlite_setup(RankingMode::Window).await).await;
}

#[tokio::test]
async fn test_far_offset_sqlite_application() {
    check_far_offset(sqlite_setup(RankingMode::Application).await).await;
}

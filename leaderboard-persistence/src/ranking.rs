//! Rank order for players inside one leaderboard.
//!
//! Players are ordered by descending score, then by creation time, then by
//! id. The same order drives the SQL window in [`WINDOW_RANK_SQL`], so ranks
//! computed in process and by the engine agree.

use std::cmp::Ordering;

use leaderboard_types::{Player, RankedPlayer};

/// Row-number window partitioned by leaderboard. Ties on score get distinct,
/// creation-ordered ranks.
pub const WINDOW_RANK_SQL: &str = "ROW_NUMBER() OVER (PARTITION BY leaderboard_id ORDER BY score DESC, created_at ASC, id ASC)";

pub const RANK_ALIAS: &str = "rank";

pub fn compare(a: &Player, b: &Player) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Numbers one leaderboard's players 1..=N in rank order.
///
/// The caller must pass every player of the partition; ranks are positions
/// within the slice given.
pub fn rank_partition(mut players: Vec<Player>) -> Vec<RankedPlayer> {
    players.sort_by(compare);
    players
        .into_iter()
        .enumerate()
        .map(|(index, player)| RankedPlayer {
            player,
            rank: index as i64 + 1,
        })
        .collect()
}

/// Applies `limit`/`offset` to an already ranked partition.
pub fn page(ranked: Vec<RankedPlayer>, limit: u64, offset: u64) -> Vec<RankedPlayer> {
    ranked
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(limit).unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn player(name: &str, score: i64, age_secs: i64) -> Player {
        let mut player = Player::new(Uuid::nil(), name, score);
        player.id = Uuid::new_v4();
        player.created_at = Utc::now() - Duration::seconds(age_secs);
        player
    }

    #[test]
    fn test_descending_score() {
        let ranked = rank_partition(vec![
            player("a", 100, 0),
            player("b", 300, 0),
            player("c", 200, 0),
        ]);

        let names: Vec<_> = ranked.iter().map(|r| r.player.name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        let ranks: Vec<_> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_get_distinct_ranks_by_creation() {
        let ranked = rank_partition(vec![
            player("newer", 200, 10),
            player("older", 200, 20),
            player("low", 100, 30),
        ]);

        assert_eq!(ranked[0].player.name, "older");
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[1].player.name, "newer");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_full_tie_falls_back_to_id() {
        let now = Utc::now();
        let mut a = player("a", 5, 0);
        let mut b = player("b", 5, 0);
        a.created_at = now;
        b.created_at = now;
        a.id = Uuid::from_u128(2);
        b.id = Uuid::from_u128(1);

        let ranked = rank_partition(vec![a, b]);
        assert_eq!(ranked[0].player.name, "b");
        assert_eq!(ranked[1].player.name, "a");
    }

    #[test]
    fn test_empty_partition() {
        assert!(rank_partition(Vec::new()).is_empty());
    }

    #[test]
    fn test_pages_concatenate_to_full_order() {
        let players: Vec<_> = (0..7).map(|i| player(&format!("p{i}"), i * 10, 0)).collect();
        let full = rank_partition(players);

        let mut stitched = Vec::new();
        for offset in (0..10).step_by(3) {
            stitched.extend(page(full.clone(), 3, offset));
        }

        assert_eq!(stitched, full);
        assert!(page(full.clone(), 3, 7).is_empty());
        assert_eq!(page(full, 0, 0).len(), 0);
    }
}

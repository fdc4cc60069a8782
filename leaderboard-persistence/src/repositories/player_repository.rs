use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Alias, Asterisk, Expr, Query};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use crate::config::RankingMode;
use crate::entities::{players, prelude::*};
use crate::error::{StoreError, StoreResult, no_rows};
use crate::ranking::{self, RANK_ALIAS, WINDOW_RANK_SQL};
use crate::repositories::PlayerStore;
use leaderboard_types::{LeaderboardId, Player, PlayerId, RankedPlayer};

/// Largest LIMIT/OFFSET the SQL drivers accept; they bind both as i64.
const MAX_SQL_BOUND: u64 = i64::MAX as u64;

#[derive(Debug, FromQueryResult)]
struct RankedRow {
    id: Uuid,
    leaderboard_id: Uuid,
    name: String,
    score: i64,
    created_at: DateTimeWithTimeZone,
    updated_at: DateTimeWithTimeZone,
    rank: i64,
}

#[derive(Clone)]
pub struct PlayerRepository {
    db: DatabaseConnection,
    ranking_mode: RankingMode,
}

impl PlayerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_ranking_mode(db, RankingMode::default())
    }

    pub fn with_ranking_mode(db: DatabaseConnection, ranking_mode: RankingMode) -> Self {
        Self { db, ranking_mode }
    }

    pub fn ranking_mode(&self) -> RankingMode {
        self.ranking_mode
    }

    pub(crate) fn model_to_player(model: players::Model) -> Player {
        Player {
            id: model.id,
            leaderboard_id: model.leaderboard_id,
            name: model.name,
            score: model.score,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }

    fn row_to_ranked(row: RankedRow) -> RankedPlayer {
        RankedPlayer {
            player: Player {
                id: row.id,
                leaderboard_id: row.leaderboard_id,
                name: row.name,
                score: row.score,
                created_at: row.created_at.with_timezone(&Utc),
                updated_at: row.updated_at.with_timezone(&Utc),
            },
            rank: row.rank,
        }
    }

    /// Every player of one leaderboard, numbered in process.
    async fn ranked_partition(&self, leaderboard_id: LeaderboardId) -> StoreResult<Vec<RankedPlayer>> {
        let models = Players::find()
            .filter(players::Column::LeaderboardId.eq(leaderboard_id))
            .order_by_desc(players::Column::Score)
            .order_by_asc(players::Column::CreatedAt)
            .order_by_asc(players::Column::Id)
            .all(&self.db)
            .await?;

        Ok(ranking::rank_partition(
            models.into_iter().map(Self::model_to_player).collect(),
        ))
    }

    async fn window_ranked_by_pk(&self, id: PlayerId) -> StoreResult<Option<RankedPlayer>> {
        // The window has to see the whole leaderboard, so rank inside a
        // subquery and only then pick the one player out.
        let partition = Query::select()
            .column(players::Column::LeaderboardId)
            .from(Players)
            .and_where(Expr::col(players::Column::Id).eq(id))
            .to_owned();

        let ranked = Query::select()
            .column(Asterisk)
            .expr_as(Expr::cust(WINDOW_RANK_SQL), Alias::new(RANK_ALIAS))
            .from(Players)
            .and_where(Expr::col(players::Column::LeaderboardId).in_subquery(partition))
            .to_owned();

        let query = Query::select()
            .column(Asterisk)
            .from_subquery(ranked, Alias::new("ranked"))
            .and_where(Expr::col(players::Column::Id).eq(id))
            .to_owned();

        let statement = self.db.get_database_backend().build(&query);
        let row = RankedRow::find_by_statement(statement)
            .one(&self.db)
            .await?;

        Ok(row.map(Self::row_to_ranked))
    }

    async fn window_list(
        &self,
        leaderboard_id: LeaderboardId,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<RankedPlayer>> {
        let rows = Players::find()
            .column_as(Expr::cust(WINDOW_RANK_SQL), RANK_ALIAS)
            .filter(players::Column::LeaderboardId.eq(leaderboard_id))
            .order_by_desc(players::Column::Score)
            .order_by_asc(players::Column::CreatedAt)
            .order_by_asc(players::Column::Id)
            .limit(limit.min(MAX_SQL_BOUND))
            .offset(offset.min(MAX_SQL_BOUND))
            .into_model::<RankedRow>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Self::row_to_ranked).collect())
    }
}

#[async_trait]
impl PlayerStore for PlayerRepository {
    async fn exists(&self, name: &str) -> StoreResult<bool> {
        let count = Players::find()
            .filter(players::Column::Name.eq(name))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn get_by_pk(&self, id: PlayerId) -> StoreResult<Player> {
        Players::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Self::model_to_player)
            .ok_or_else(|| StoreError::player_not_found(id, no_rows("players")))
    }

    async fn get_ranked_by_pk(&self, id: PlayerId) -> StoreResult<RankedPlayer> {
        let ranked = match self.ranking_mode {
            RankingMode::Window => self.window_ranked_by_pk(id).await?,
            RankingMode::Application => {
                let player = self.get_by_pk(id).await?;
                self.ranked_partition(player.leaderboard_id)
                    .await?
                    .into_iter()
                    .find(|ranked| ranked.player.id == id)
            }
        };

        ranked.ok_or_else(|| StoreError::player_not_found(id, no_rows("players")))
    }

    async fn list(
        &self,
        leaderboard_id: LeaderboardId,
        limit: u64,
        offset: u64,
    ) -> StoreResult<Vec<RankedPlayer>> {
        match self.ranking_mode {
            RankingMode::Window => self.window_list(leaderboard_id, limit, offset).await,
            RankingMode::Application => {
                let ranked = self.ranked_partition(leaderboard_id).await?;
                Ok(ranking::page(ranked, limit, offset))
            }
        }
    }

    async fn create(&self, player: &Player) -> StoreResult<Player> {
        let id = if player.is_unsaved() {
            Uuid::new_v4()
        } else {
            player.id
        };
        let now: DateTimeWithTimeZone = Utc::now().into();

        let player_model = players::ActiveModel {
            id: ActiveValue::Set(id),
            leaderboard_id: ActiveValue::Set(player.leaderboard_id),
            name: ActiveValue::Set(player.name.clone()),
            score: ActiveValue::Set(player.score),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let saved_model = Players::insert(player_model).exec(&self.db).await?;

        let created = Players::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotInserted)?;

        tracing::debug!(player_id = %created.id, leaderboard_id = %created.leaderboard_id, "player created");
        Ok(Self::model_to_player(created))
    }

    async fn update_score(&self, player: &Player) -> StoreResult<()> {
        let now: DateTimeWithTimeZone = Utc::now().into();

        let result = Players::update_many()
            .col_expr(players::Column::Score, Expr::value(player.score))
            .col_expr(players::Column::UpdatedAt, Expr::value(now))
            .filter(players::Column::Id.eq(player.id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::player_not_found(player.id, no_rows("players")));
        }

        tracing::debug!(player_id = %player.id, score = player.score, "player score updated");
        Ok(())
    }

    async fn delete(&self, player: &Player) -> StoreResult<()> {
        let result = Players::delete_by_id(player.id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(StoreError::player_not_found(player.id, no_rows("players")));
        }

        tracing::debug!(player_id = %player.id, "player deleted");
        Ok(())
    }
}

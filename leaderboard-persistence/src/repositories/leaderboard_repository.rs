use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IsolationLevel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
    prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use crate::entities::{leaderboards, players, prelude::*};
use crate::error::{StoreError, StoreResult, no_rows};
use crate::repositories::LeaderboardStore;
use leaderboard_types::{Leaderboard, LeaderboardId};

#[derive(Clone)]
pub struct LeaderboardRepository {
    db: DatabaseConnection,
    isolation_level: Option<IsolationLevel>,
}

impl LeaderboardRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            isolation_level: None,
        }
    }

    /// Runs the cascading delete at `isolation_level` instead of the engine
    /// default.
    pub fn with_isolation_level(mut self, isolation_level: Option<IsolationLevel>) -> Self {
        self.isolation_level = isolation_level;
        self
    }

    fn model_to_leaderboard(model: leaderboards::Model) -> Leaderboard {
        Leaderboard {
            id: model.id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }

    /// Player rows first, in one statement, then the leaderboard row. Returns
    /// how many players went with it.
    async fn delete_cascade(txn: &DatabaseTransaction, id: LeaderboardId) -> StoreResult<u64> {
        let expected = Players::find()
            .filter(players::Column::LeaderboardId.eq(id))
            .count(txn)
            .await?;

        let removed = Players::delete_many()
            .filter(players::Column::LeaderboardId.eq(id))
            .exec(txn)
            .await?
            .rows_affected;

        if removed < expected {
            tracing::warn!(leaderboard_id = %id, expected, removed, "players vanished during cascade");
            return Err(StoreError::player_not_found(
                id,
                DbErr::RecordNotFound(format!(
                    "deleted {removed} of {expected} players in leaderboard {id}"
                )),
            ));
        }

        let result = Leaderboards::delete_by_id(id).exec(txn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::leaderboard_not_found(id, no_rows("leaderboards")));
        }

        Ok(removed)
    }
}

#[async_trait]
impl LeaderboardStore for LeaderboardRepository {
    async fn get_by_pk(&self, id: LeaderboardId) -> StoreResult<Leaderboard> {
        Leaderboards::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Self::model_to_leaderboard)
            .ok_or_else(|| StoreError::leaderboard_not_found(id, no_rows("leaderboards")))
    }

    async fn list(&self) -> StoreResult<Vec<Leaderboard>> {
        let models = Leaderboards::find()
            .order_by_asc(leaderboards::Column::CreatedAt)
            .order_by_asc(leaderboards::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Self::model_to_leaderboard).collect())
    }

    async fn create(&self, leaderboard: &Leaderboard) -> StoreResult<Leaderboard> {
        let id = if leaderboard.is_unsaved() {
            Uuid::new_v4()
        } else {
            leaderboard.id
        };
        let now: DateTimeWithTimeZone = Utc::now().into();

        let leaderboard_model = leaderboards::ActiveModel {
            id: ActiveValue::Set(id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        };

        let saved_model = Leaderboards::insert(leaderboard_model)
            .exec(&self.db)
            .await?;

        let created = Leaderboards::find_by_id(saved_model.last_insert_id)
            .one(&self.db)
            .await?
            .ok_or(DbErr::RecordNotInserted)?;

        tracing::debug!(leaderboard_id = %created.id, "leaderboard created");
        Ok(Self::model_to_leaderboard(created))
    }

    async fn delete(&self, leaderboard: &Leaderboard) -> StoreResult<()> {
        let txn = self
            .db
            .begin_with_config(self.isolation_level, None)
            .await?;

        match Self::delete_cascade(&txn, leaderboard.id).await {
            Ok(removed_players) => {
                txn.commit().await?;
                tracing::debug!(
                    leaderboard_id = %leaderboard.id,
                    removed_players,
                    "leaderboard deleted"
                );
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "failed to roll back leaderboard delete");
                }
                Err(err)
            }
        }
    }
}

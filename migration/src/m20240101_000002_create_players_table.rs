use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_leaderboards_table::Leaderboards;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Players::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Players::LeaderboardId).uuid().not_null())
                    .col(ColumnDef::new(Players::Name).string().not_null())
                    .col(
                        ColumnDef::new(Players::Score)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // No ON DELETE CASCADE: the leaderboard store removes
                    // players itself inside the delete transaction.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_leaderboard_id")
                            .from(Players::Table, Players::LeaderboardId)
                            .to(Leaderboards::Table, Leaderboards::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Ranked listing scans one leaderboard by descending score
        manager
            .create_index(
                Index::create()
                    .name("idx_players_leaderboard_score")
                    .table(Players::Table)
                    .col(Players::LeaderboardId)
                    .col(Players::Score)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_players_name")
                    .table(Players::Table)
                    .col(Players::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    LeaderboardId,
    Name,
    Score,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000001_create_ride_table::Ride;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RideStatusHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(RideStatusHistory::Id))
                    .col(integer(RideStatusHistory::RideId))
                    .col(string_null(RideStatusHistory::FromStatus))
                    .col(string(RideStatusHistory::ToStatus))
                    .col(big_integer_null(RideStatusHistory::ChangedBy))
                    .col(string(RideStatusHistory::ActorRole))
                    .col(string_null(RideStatusHistory::Reason))
                    .col(json_null(RideStatusHistory::Meta))
                    .col(
                        timestamp(RideStatusHistory::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ride_status_history_ride_id")
                            .from(RideStatusHistory::Table, RideStatusHistory::RideId)
                            .to(Ride::Table, Ride::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RideStatusHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RideStatusHistory {
    Table,
    Id,
    RideId,
    FromStatus,
    ToStatus,
    ChangedBy,
    ActorRole,
    Reason,
    Meta,
    CreatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ride::Table)
                    .if_not_exists()
                    .col(pk_auto(Ride::Id))
                    .col(big_integer(Ride::ClientId))
                    .col(integer_null(Ride::DriverProfileId))
                    .col(string(Ride::Status))
                    .col(string_null(Ride::StatusReason))
                    .col(string_null(Ride::PickupAddress))
                    .col(double_null(Ride::PickupLat))
                    .col(double_null(Ride::PickupLng))
                    .col(string_null(Ride::DropoffAddress))
                    .col(double_null(Ride::DropoffLat))
                    .col(double_null(Ride::DropoffLng))
                    .col(timestamp_null(Ride::ScheduledAt))
                    .col(timestamp_null(Ride::StartedAt))
                    .col(timestamp_null(Ride::CompletedAt))
                    .col(timestamp_null(Ride::CanceledAt))
                    .col(string_null(Ride::CancellationReason))
                    .col(double_null(Ride::ExpectedFare))
                    .col(json_null(Ride::ExpectedFareSnapshot))
                    .col(double_null(Ride::DriverFare))
                    .col(double_null(Ride::ActualFare))
                    .col(integer_null(Ride::DistanceMeters))
                    .col(integer_null(Ride::DurationSeconds))
                    .col(integer_null(Ride::TransactionId))
                    .col(integer_null(Ride::CommissionId))
                    .col(boolean(Ride::IsAnomaly).default(false))
                    .col(string_null(Ride::AnomalyReason))
                    .col(json_null(Ride::Metadata))
                    .col(
                        timestamp(Ride::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(Ride::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ride::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ride {
    Table,
    Id,
    ClientId,
    DriverProfileId,
    Status,
    StatusReason,
    PickupAddress,
    PickupLat,
    PickupLng,
    DropoffAddress,
    DropoffLat,
    DropoffLng,
    ScheduledAt,
    StartedAt,
    CompletedAt,
    CanceledAt,
    CancellationReason,
    ExpectedFare,
    ExpectedFareSnapshot,
    DriverFare,
    ActualFare,
    DistanceMeters,
    DurationSeconds,
    TransactionId,
    CommissionId,
    IsAnomaly,
    AnomalyReason,
    Metadata,
    CreatedAt,
    UpdatedAt,
}

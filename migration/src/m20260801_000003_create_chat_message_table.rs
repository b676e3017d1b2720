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
                    .table(ChatMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(ChatMessage::Id))
                    .col(integer(ChatMessage::RideId))
                    .col(big_integer(ChatMessage::SenderId))
                    .col(big_integer_null(ChatMessage::ReceiverId))
                    .col(text(ChatMessage::Text))
                    .col(string(ChatMessage::MessageType))
                    .col(json_null(ChatMessage::Attachments))
                    .col(boolean(ChatMessage::IsModerated).default(true))
                    .col(
                        timestamp(ChatMessage::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_null(ChatMessage::EditedAt))
                    .col(timestamp_null(ChatMessage::DeletedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_chat_message_ride_id")
                            .from(ChatMessage::Table, ChatMessage::RideId)
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
            .drop_table(Table::drop().table(ChatMessage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ChatMessage {
    Table,
    Id,
    RideId,
    SenderId,
    ReceiverId,
    Text,
    MessageType,
    Attachments,
    IsModerated,
    CreatedAt,
    EditedAt,
    DeletedAt,
}

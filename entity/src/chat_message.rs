use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of payload a chat message carries.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[sea_orm(string_value = "text")]
    Text,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "location")]
    Location,
    #[sea_orm(string_value = "system")]
    System,
    #[sea_orm(string_value = "voice")]
    Voice,
}

/// One message in a per-ride chat. Deletion is soft (`deleted_at`).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ride_id: i32,
    pub sender_id: i64,
    pub receiver_id: Option<i64>,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub message_type: MessageType,
    #[sea_orm(column_type = "Json", nullable)]
    pub attachments: Option<Json>,
    pub is_moderated: bool,
    pub created_at: DateTimeUtc,
    pub edited_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ride::Entity",
        from = "Column::RideId",
        to = "super::ride::Column::Id"
    )]
    Ride,
}

impl Related<super::ride::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ride.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

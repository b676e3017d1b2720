use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ride::{ActorRole, RideStatus};

/// Append-only audit trail of ride status transitions.
///
/// Rows are inserted in the same transaction as the ride mutation they record
/// and are never updated or deleted. `from_status` is null only for the row
/// written at ride creation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ride_status_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ride_id: i32,
    pub from_status: Option<RideStatus>,
    pub to_status: RideStatus,
    pub changed_by: Option<i64>,
    pub actor_role: ActorRole,
    pub reason: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub meta: Option<Json>,
    pub created_at: DateTimeUtc,
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

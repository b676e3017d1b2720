use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a ride.
///
/// `Completed` and `Canceled` are terminal; every other status admits further
/// transitions according to the role-based transition table in the main
/// crate's model layer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    #[sea_orm(string_value = "requested")]
    Requested,
    #[sea_orm(string_value = "driver_assigned")]
    DriverAssigned,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "arrived")]
    Arrived,
    #[sea_orm(string_value = "started")]
    Started,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

/// Role of the actor requesting a status change.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "driver")]
    Driver,
    #[sea_orm(string_value = "system")]
    System,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ride")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub client_id: i64,
    /// Null until a driver is assigned or accepts the ride.
    pub driver_profile_id: Option<i32>,
    pub status: RideStatus,
    pub status_reason: Option<String>,
    pub pickup_address: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub scheduled_at: Option<DateTimeUtc>,
    pub started_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    pub canceled_at: Option<DateTimeUtc>,
    pub cancellation_reason: Option<String>,
    pub expected_fare: Option<f64>,
    #[sea_orm(column_type = "Json", nullable)]
    pub expected_fare_snapshot: Option<Json>,
    pub driver_fare: Option<f64>,
    pub actual_fare: Option<f64>,
    pub distance_meters: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub transaction_id: Option<i32>,
    pub commission_id: Option<i32>,
    pub is_anomaly: bool,
    pub anomaly_reason: Option<String>,
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ride_status_history::Entity")]
    RideStatusHistory,
    #[sea_orm(has_many = "super::chat_message::Entity")]
    ChatMessage,
}

impl Related<super::ride_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RideStatusHistory.def()
    }
}

impl Related<super::chat_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatMessage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Domain models for ride data operations and the status transition table.

use chrono::{DateTime, Utc};
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use entity::ride::{ActorRole, RideStatus};

/// A trip request moving through its lifecycle from request to completion or
/// cancellation.
///
/// The status field is mutated exclusively through
/// [`RideService`](crate::service::ride::RideService) operations; there is no
/// generic field-level update, which keeps status and the status-specific
/// timestamp fields from diverging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    /// Unique identifier for the ride.
    pub id: i32,
    /// ID of the client who requested the ride.
    pub client_id: i64,
    /// Driver profile assigned to the ride; `None` until assignment.
    pub driver_profile_id: Option<i32>,
    /// Current lifecycle status.
    pub status: RideStatus,
    /// Human-readable note attached to the last status change.
    pub status_reason: Option<String>,
    pub pickup_address: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    /// Requested pickup time for scheduled rides.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Set once, when the ride enters `started`.
    pub started_at: Option<DateTime<Utc>>,
    /// Set once, when the ride enters `completed`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Set once, when the ride enters `canceled`.
    pub canceled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    /// Fare quoted to the client at request time.
    pub expected_fare: Option<f64>,
    /// Structured snapshot of the tariff used for the quote.
    pub expected_fare_snapshot: Option<Value>,
    pub driver_fare: Option<f64>,
    pub actual_fare: Option<f64>,
    pub distance_meters: Option<i32>,
    pub duration_seconds: Option<i32>,
    pub transaction_id: Option<i32>,
    pub commission_id: Option<i32>,
    pub is_anomaly: bool,
    pub anomaly_reason: Option<String>,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Converts an entity model to a ride domain model at the repository
    /// boundary.
    pub fn from_entity(entity: entity::ride::Model) -> Self {
        Self {
            id: entity.id,
            client_id: entity.client_id,
            driver_profile_id: entity.driver_profile_id,
            status: entity.status,
            status_reason: entity.status_reason,
            pickup_address: entity.pickup_address,
            pickup_lat: entity.pickup_lat,
            pickup_lng: entity.pickup_lng,
            dropoff_address: entity.dropoff_address,
            dropoff_lat: entity.dropoff_lat,
            dropoff_lng: entity.dropoff_lng,
            scheduled_at: entity.scheduled_at,
            started_at: entity.started_at,
            completed_at: entity.completed_at,
            canceled_at: entity.canceled_at,
            cancellation_reason: entity.cancellation_reason,
            expected_fare: entity.expected_fare,
            expected_fare_snapshot: entity.expected_fare_snapshot,
            driver_fare: entity.driver_fare,
            actual_fare: entity.actual_fare,
            distance_meters: entity.distance_meters,
            duration_seconds: entity.duration_seconds,
            transaction_id: entity.transaction_id,
            commission_id: entity.commission_id,
            is_anomaly: entity.is_anomaly,
            anomaly_reason: entity.anomaly_reason,
            metadata: entity.metadata,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// One recorded status transition from the ride's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideStatusChange {
    pub id: i32,
    pub ride_id: i32,
    /// Status before the transition; `None` only for the creation record.
    pub from_status: Option<RideStatus>,
    pub to_status: RideStatus,
    /// ID of the actor who performed the transition, when known.
    pub changed_by: Option<i64>,
    pub actor_role: ActorRole,
    pub reason: Option<String>,
    pub meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl RideStatusChange {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::ride_status_history::Model) -> Self {
        Self {
            id: entity.id,
            ride_id: entity.ride_id,
            from_status: entity.from_status,
            to_status: entity.to_status,
            changed_by: entity.changed_by,
            actor_role: entity.actor_role,
            reason: entity.reason,
            meta: entity.meta,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for creating a new ride request.
///
/// The ride always starts in `requested`; a creation audit record is written
/// in the same transaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRideParams {
    pub client_id: i64,
    pub pickup_address: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub dropoff_address: Option<String>,
    pub dropoff_lat: Option<f64>,
    pub dropoff_lng: Option<f64>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub expected_fare: Option<f64>,
    pub expected_fare_snapshot: Option<Value>,
}

/// Parameters for a status transition request.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatusParams {
    pub ride_id: i32,
    pub to_status: RideStatus,
    pub actor_id: Option<i64>,
    pub actor_role: ActorRole,
    pub reason: Option<String>,
    pub meta: Option<Value>,
}

/// Outcome of a driver's attempt to accept a ride.
///
/// Exactly one request transitions the ride under concurrent acceptance
/// attempts; all others observe one of the non-`Accepted` outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum AcceptOutcome {
    /// The update applied; carries the fresh ride.
    Accepted(Ride),
    /// The ride is already assigned to the calling driver. This is the
    /// idempotent-retry path and carries the current ride unchanged.
    AlreadyYours(Ride),
    /// Another driver holds the assignment, or the row lock could not be
    /// acquired without waiting.
    AlreadyTaken,
    /// The ride is no longer acceptable (already past `driver_assigned`).
    InvalidStatus,
    /// No ride with the given id exists.
    NotFound,
}

/// Statuses the given role may move a ride to from `from`.
///
/// `completed` and `canceled` are absorbing: no role has any outgoing
/// transition from them.
pub fn allowed_targets(role: ActorRole, from: RideStatus) -> &'static [RideStatus] {
    use RideStatus::*;

    match (role, from) {
        (ActorRole::Client, Requested | DriverAssigned | Accepted) => &[Canceled],
        (ActorRole::Driver, DriverAssigned) => &[Accepted, Canceled],
        (ActorRole::Driver, Accepted) => &[Arrived, Canceled],
        (ActorRole::Driver, Arrived) => &[Started, Canceled],
        (ActorRole::Driver, Started) => &[Completed, Canceled],
        (ActorRole::System, Requested) => &[DriverAssigned, Canceled],
        (ActorRole::System, DriverAssigned) => &[Accepted, Canceled],
        (ActorRole::System, Accepted) => &[Arrived, Canceled],
        (ActorRole::System, Arrived) => &[Started, Canceled],
        (ActorRole::System, Started) => &[Completed, Canceled],
        _ => &[],
    }
}

/// Statuses from which the given role may reach `to`.
///
/// This is the predicate set for the conditional update in
/// `RideRepository::change_status`: the update applies only while the ride's
/// current status is in the returned set. An empty set means no state admits
/// the transition for that role and the request can be rejected without
/// touching storage.
pub fn allowed_from(role: ActorRole, to: RideStatus) -> Vec<RideStatus> {
    RideStatus::iter()
        .filter(|from| allowed_targets(role, *from).contains(&to))
        .collect()
}

use crate::data::ride::RideRepository;
use crate::data::ride_history::RideStatusHistoryRepository;
use crate::model::ride::{
    allowed_from, AcceptOutcome, ActorRole, ChangeStatusParams, CreateRideParams, RideStatus,
};
use sea_orm::Iterable;
use test_utils::{builder::TestBuilder, factory::ride::RideFactory};

mod change_status;
mod list_pending;

/// Builds the standard transition request used across these tests.
fn change(
    ride_id: i32,
    to_status: RideStatus,
    actor_role: ActorRole,
    reason: Option<&str>,
) -> ChangeStatusParams {
    ChangeStatusParams {
        ride_id,
        to_status,
        actor_id: Some(1),
        actor_role,
        reason: reason.map(str::to_string),
        meta: None,
    }
}

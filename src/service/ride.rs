use sea_orm::DatabaseConnection;
use tracing::{debug, info};

use crate::{
    data::{ride::RideRepository, ride_history::RideStatusHistoryRepository},
    error::AppError,
    model::ride::{
        allowed_from, AcceptOutcome, ChangeStatusParams, CreateRideParams, Ride, RideStatusChange,
    },
};

/// Orchestrates the ride lifecycle.
///
/// The three mutating operations here - `create`, `change_status`,
/// `accept_ride` - are the only sanctioned ways to mutate a ride row.
pub struct RideService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RideService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new ride in `requested` status.
    pub async fn create(&self, params: CreateRideParams) -> Result<Ride, AppError> {
        let ride = RideRepository::new(self.db).create(params).await?;

        info!(ride_id = ride.id, client_id = ride.client_id, "ride created");

        Ok(ride)
    }

    /// Gets a ride by ID.
    pub async fn get_by_id(&self, ride_id: i32) -> Result<Option<Ride>, AppError> {
        Ok(RideRepository::new(self.db).get_by_id(ride_id).await?)
    }

    /// Applies a status transition according to the role-based transition
    /// table.
    ///
    /// # Returns
    /// - `Ok(Some(Ride))`: Transition applied; the updated ride
    /// - `Ok(None)`: The ride does not exist, or the transition is not
    ///   permitted for this role from the ride's current status. Expected
    ///   under concurrency and not an error; callers map it to 404.
    /// - `Err(AppError)`: Database error
    pub async fn change_status(
        &self,
        params: ChangeStatusParams,
    ) -> Result<Option<Ride>, AppError> {
        let allowed_from = allowed_from(params.actor_role, params.to_status);
        if allowed_from.is_empty() {
            // No state admits this transition for the role; rejected without
            // touching storage.
            debug!(
                ride_id = params.ride_id,
                to_status = ?params.to_status,
                actor_role = ?params.actor_role,
                "transition target unreachable for role"
            );
            return Ok(None);
        }

        let updated = RideRepository::new(self.db)
            .change_status(&params, &allowed_from)
            .await?;

        match &updated {
            Some(ride) => info!(
                ride_id = ride.id,
                to_status = ?ride.status,
                actor_role = ?params.actor_role,
                "ride status changed"
            ),
            None => debug!(
                ride_id = params.ride_id,
                to_status = ?params.to_status,
                actor_role = ?params.actor_role,
                "status change was a no-op"
            ),
        }

        Ok(updated)
    }

    /// Accepts a ride on behalf of a driver.
    ///
    /// Contention outcomes (`AlreadyTaken`, `InvalidStatus`) are routine and
    /// reported in the outcome, never as errors; whether to retry is the
    /// caller's decision.
    pub async fn accept_ride(
        &self,
        ride_id: i32,
        driver_profile_id: i32,
        actor_id: i64,
    ) -> Result<AcceptOutcome, AppError> {
        let outcome = RideRepository::new(self.db)
            .accept_ride(ride_id, driver_profile_id, actor_id)
            .await?;

        match &outcome {
            AcceptOutcome::Accepted(_) => {
                info!(ride_id, driver_profile_id, "ride accepted");
            }
            outcome => {
                debug!(ride_id, driver_profile_id, ?outcome, "accept attempt did not win");
            }
        }

        Ok(outcome)
    }

    /// Lists rides awaiting a driver, newest first, for the dispatch feed.
    pub async fn list_pending(&self, limit: u64) -> Result<Vec<Ride>, AppError> {
        Ok(RideRepository::new(self.db).list_pending(limit).await?)
    }

    /// Reads a ride's audit trail in chronological order.
    pub async fn history(&self, ride_id: i32) -> Result<Vec<RideStatusChange>, AppError> {
        Ok(RideStatusHistoryRepository::new(self.db)
            .list_for_ride(ride_id)
            .await?)
    }
}

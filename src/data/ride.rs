use chrono::Utc;
use sea_orm::sea_query::{Expr, LockBehavior, LockType};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

use entity::ride::{ActorRole, Column, RideStatus};

use crate::model::ride::{AcceptOutcome, ChangeStatusParams, CreateRideParams, Ride};

/// Reason recorded on the ride when a driver wins the acceptance race.
const ACCEPT_REASON: &str = "Driver accepted";

pub struct RideRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RideRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Row-level locking is only meaningful on backends that support it;
    /// SQLite serializes writers and rejects `FOR UPDATE` syntax.
    fn supports_row_locks(&self) -> bool {
        self.db.get_database_backend() == DbBackend::Postgres
    }

    /// Creates a ride in `requested` status together with its creation audit
    /// record, in one transaction.
    ///
    /// # Arguments
    /// - `params`: Ride creation data supplied by the client
    ///
    /// # Returns
    /// - `Ok(Ride)`: The created ride
    /// - `Err(DbErr)`: Database error
    pub async fn create(&self, params: CreateRideParams) -> Result<Ride, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let ride = entity::ride::ActiveModel {
            client_id: ActiveValue::Set(params.client_id),
            status: ActiveValue::Set(RideStatus::Requested),
            pickup_address: ActiveValue::Set(params.pickup_address),
            pickup_lat: ActiveValue::Set(params.pickup_lat),
            pickup_lng: ActiveValue::Set(params.pickup_lng),
            dropoff_address: ActiveValue::Set(params.dropoff_address),
            dropoff_lat: ActiveValue::Set(params.dropoff_lat),
            dropoff_lng: ActiveValue::Set(params.dropoff_lng),
            scheduled_at: ActiveValue::Set(params.scheduled_at),
            expected_fare: ActiveValue::Set(params.expected_fare),
            expected_fare_snapshot: ActiveValue::Set(params.expected_fare_snapshot),
            is_anomaly: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        insert_history(
            &txn,
            ride.id,
            None,
            RideStatus::Requested,
            Some(ride.client_id),
            ActorRole::Client,
            None,
            None,
        )
        .await?;

        txn.commit().await?;

        Ok(Ride::from_entity(ride))
    }

    /// Gets a ride by ID.
    ///
    /// # Returns
    /// - `Ok(Some(Ride))`: The ride
    /// - `Ok(None)`: Ride not found
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<Ride>, DbErr> {
        Ok(entity::prelude::Ride::find_by_id(id)
            .one(self.db)
            .await?
            .map(Ride::from_entity))
    }

    /// Applies a status transition if the ride's current status is in
    /// `allowed_from`.
    ///
    /// The whole operation is one transaction: the row is locked, the update
    /// carries the `status IN (allowed_from)` predicate so that only one of
    /// two concurrent writers can match, and the audit record is inserted
    /// only when the update affected the row. Entering `started`,
    /// `completed` or `canceled` also sets the corresponding timestamp (and
    /// `cancellation_reason` for cancellations).
    ///
    /// # Arguments
    /// - `params`: The requested transition
    /// - `allowed_from`: Statuses from which the transition is permitted,
    ///   as computed from the transition table for the acting role
    ///
    /// # Returns
    /// - `Ok(Some(Ride))`: Transition applied; the updated ride
    /// - `Ok(None)`: Ride not found, or its current status was not in
    ///   `allowed_from` (the two are indistinguishable by design)
    /// - `Err(DbErr)`: Database error
    pub async fn change_status(
        &self,
        params: &ChangeStatusParams,
        allowed_from: &[RideStatus],
    ) -> Result<Option<Ride>, DbErr> {
        let txn = self.db.begin().await?;

        let mut query = entity::prelude::Ride::find_by_id(params.ride_id);
        if self.supports_row_locks() {
            query = query.lock_exclusive();
        }
        let Some(current) = query.one(&txn).await? else {
            txn.commit().await?;
            return Ok(None);
        };

        let now = Utc::now();
        let mut update = entity::prelude::Ride::update_many()
            .col_expr(Column::Status, Expr::value(params.to_status))
            .col_expr(Column::StatusReason, Expr::value(params.reason.clone()))
            .col_expr(Column::UpdatedAt, Expr::value(now));
        match params.to_status {
            RideStatus::Started => {
                update = update.col_expr(Column::StartedAt, Expr::value(Some(now)));
            }
            RideStatus::Completed => {
                update = update.col_expr(Column::CompletedAt, Expr::value(Some(now)));
            }
            RideStatus::Canceled => {
                update = update
                    .col_expr(Column::CanceledAt, Expr::value(Some(now)))
                    .col_expr(
                        Column::CancellationReason,
                        Expr::value(params.reason.clone()),
                    );
            }
            _ => {}
        }

        let result = update
            .filter(Column::Id.eq(params.ride_id))
            .filter(Column::Status.is_in(allowed_from.iter().copied()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.commit().await?;
            return Ok(None);
        }

        insert_history(
            &txn,
            params.ride_id,
            Some(current.status),
            params.to_status,
            params.actor_id,
            params.actor_role,
            params.reason.clone(),
            params.meta.clone(),
        )
        .await?;

        let updated = reload(&txn, params.ride_id).await?;
        txn.commit().await?;

        Ok(Some(updated))
    }

    /// Accepts a ride on behalf of a driver, resolving concurrent attempts
    /// to exactly one winner.
    ///
    /// The row lock is taken without waiting; losing the lock race reports
    /// `AlreadyTaken` immediately rather than queueing behind the winner.
    /// The update applies only while the ride is still acceptable
    /// (`requested`/`driver_assigned`) and unassigned or assigned to the
    /// calling driver, which makes retries by the winner idempotent.
    ///
    /// # Arguments
    /// - `ride_id`: Ride to accept
    /// - `driver_profile_id`: Profile of the accepting driver
    /// - `actor_id`: User id recorded in the audit trail
    ///
    /// # Returns
    /// - `Ok(AcceptOutcome)`: Classification of the attempt; never an error
    ///   for expected contention outcomes
    /// - `Err(DbErr)`: Database error
    pub async fn accept_ride(
        &self,
        ride_id: i32,
        driver_profile_id: i32,
        actor_id: i64,
    ) -> Result<AcceptOutcome, DbErr> {
        let txn = self.db.begin().await?;

        let mut query = entity::prelude::Ride::find_by_id(ride_id);
        if self.supports_row_locks() {
            query = query.lock_with_behavior(LockType::Update, LockBehavior::Nowait);
        }
        let current = match query.one(&txn).await {
            Ok(current) => current,
            Err(err) if is_lock_unavailable(&err) => {
                txn.rollback().await?;
                return Ok(AcceptOutcome::AlreadyTaken);
            }
            Err(err) => return Err(err),
        };
        let Some(current) = current else {
            txn.commit().await?;
            return Ok(AcceptOutcome::NotFound);
        };

        let now = Utc::now();
        let result = entity::prelude::Ride::update_many()
            .col_expr(Column::DriverProfileId, Expr::value(Some(driver_profile_id)))
            .col_expr(Column::Status, Expr::value(RideStatus::Accepted))
            .col_expr(Column::StatusReason, Expr::value(Some(ACCEPT_REASON.to_string())))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.eq(ride_id))
            .filter(
                Column::Status.is_in([RideStatus::Requested, RideStatus::DriverAssigned]),
            )
            .filter(
                Condition::any()
                    .add(Column::DriverProfileId.is_null())
                    .add(Column::DriverProfileId.eq(driver_profile_id)),
            )
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.commit().await?;
            // Classify from the row read under the lock. The already-yours
            // check comes first so the winner's retries stay idempotent even
            // after the ride moved on.
            return Ok(if current.driver_profile_id == Some(driver_profile_id) {
                AcceptOutcome::AlreadyYours(Ride::from_entity(current))
            } else if current.driver_profile_id.is_some() {
                AcceptOutcome::AlreadyTaken
            } else if !matches!(
                current.status,
                RideStatus::Requested | RideStatus::DriverAssigned
            ) {
                AcceptOutcome::InvalidStatus
            } else {
                AcceptOutcome::AlreadyTaken
            });
        }

        insert_history(
            &txn,
            ride_id,
            Some(current.status),
            RideStatus::Accepted,
            Some(actor_id),
            ActorRole::Driver,
            Some("Driver accepted ride".to_string()),
            Some(serde_json::json!({})),
        )
        .await?;

        let updated = reload(&txn, ride_id).await?;
        txn.commit().await?;

        Ok(AcceptOutcome::Accepted(updated))
    }

    /// Lists rides awaiting a driver for the dispatch feed, newest first.
    ///
    /// Read-only; does not participate in locking and is safe to poll.
    ///
    /// # Arguments
    /// - `limit`: Maximum number of rides to return
    ///
    /// # Returns
    /// - `Ok(Vec<Ride>)`: Pending rides, newest first
    /// - `Err(DbErr)`: Database error
    pub async fn list_pending(&self, limit: u64) -> Result<Vec<Ride>, DbErr> {
        let rides = entity::prelude::Ride::find()
            .filter(
                Column::Status.is_in([RideStatus::Requested, RideStatus::DriverAssigned]),
            )
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(rides.into_iter().map(Ride::from_entity).collect())
    }
}

/// Appends one audit-trail record. Always called inside the transaction of
/// the mutation it records.
#[allow(clippy::too_many_arguments)]
async fn insert_history(
    txn: &DatabaseTransaction,
    ride_id: i32,
    from_status: Option<RideStatus>,
    to_status: RideStatus,
    changed_by: Option<i64>,
    actor_role: ActorRole,
    reason: Option<String>,
    meta: Option<serde_json::Value>,
) -> Result<(), DbErr> {
    entity::ride_status_history::ActiveModel {
        ride_id: ActiveValue::Set(ride_id),
        from_status: ActiveValue::Set(from_status),
        to_status: ActiveValue::Set(to_status),
        changed_by: ActiveValue::Set(changed_by),
        actor_role: ActiveValue::Set(actor_role),
        reason: ActiveValue::Set(reason),
        meta: ActiveValue::Set(meta),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(())
}

/// Re-reads a ride inside the transaction that just updated it.
async fn reload(txn: &DatabaseTransaction, ride_id: i32) -> Result<Ride, DbErr> {
    entity::prelude::Ride::find_by_id(ride_id)
        .one(txn)
        .await?
        .map(Ride::from_entity)
        .ok_or_else(|| DbErr::RecordNotFound(format!("Ride {} disappeared mid-update", ride_id)))
}

/// Postgres reports an unobtainable `FOR UPDATE NOWAIT` lock as error 55P03
/// with this message; there is no structured variant for it in `DbErr`.
fn is_lock_unavailable(err: &DbErr) -> bool {
    err.to_string().to_lowercase().contains("could not obtain lock")
}

//! Ride factory for creating test ride entities.
//!
//! The factory inserts entity rows directly, bypassing the service layer, so
//! tests can place a ride into any lifecycle status without walking the
//! transition sequence. No audit-trail rows are written.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::ride::RideStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test rides with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use entity::ride::RideStatus;
/// use test_utils::factory::ride::RideFactory;
///
/// let ride = RideFactory::new(&db)
///     .status(RideStatus::DriverAssigned)
///     .driver_profile_id(Some(5))
///     .build()
///     .await?;
/// ```
pub struct RideFactory<'a> {
    db: &'a DatabaseConnection,
    client_id: i64,
    driver_profile_id: Option<i32>,
    status: RideStatus,
    pickup_address: Option<String>,
    dropoff_address: Option<String>,
    expected_fare: Option<f64>,
}

impl<'a> RideFactory<'a> {
    /// Creates a new RideFactory with default values.
    ///
    /// Defaults:
    /// - client_id: auto-incremented unique id
    /// - status: `RideStatus::Requested`
    /// - driver_profile_id: `None`
    /// - pickup/dropoff: placeholder addresses
    /// - expected_fare: `Some(350.0)`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `RideFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            client_id: id as i64,
            driver_profile_id: None,
            status: RideStatus::Requested,
            pickup_address: Some(format!("Pickup St {}", id)),
            dropoff_address: Some(format!("Dropoff Ave {}", id)),
            expected_fare: Some(350.0),
        }
    }

    /// Sets the requesting client's id.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn client_id(mut self, client_id: i64) -> Self {
        self.client_id = client_id;
        self
    }

    /// Sets the assigned driver profile.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn driver_profile_id(mut self, driver_profile_id: Option<i32>) -> Self {
        self.driver_profile_id = driver_profile_id;
        self
    }

    /// Sets the ride's lifecycle status.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn status(mut self, status: RideStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the expected fare.
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn expected_fare(mut self, expected_fare: Option<f64>) -> Self {
        self.expected_fare = expected_fare;
        self
    }

    /// Builds and inserts the ride entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ride::Model)` - Created ride entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ride::Model, DbErr> {
        let now = Utc::now();
        entity::ride::ActiveModel {
            client_id: ActiveValue::Set(self.client_id),
            driver_profile_id: ActiveValue::Set(self.driver_profile_id),
            status: ActiveValue::Set(self.status),
            pickup_address: ActiveValue::Set(self.pickup_address),
            dropoff_address: ActiveValue::Set(self.dropoff_address),
            expected_fare: ActiveValue::Set(self.expected_fare),
            is_anomaly: ActiveValue::Set(false),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a ride with default values (a fresh `requested` ride).
///
/// Shorthand for `RideFactory::new(db).build().await`.
///
/// # Returns
/// - `Ok(entity::ride::Model)` - Created ride entity
/// - `Err(DbErr)` - Database error during insert
pub async fn create_ride(db: &DatabaseConnection) -> Result<entity::ride::Model, DbErr> {
    RideFactory::new(db).build().await
}

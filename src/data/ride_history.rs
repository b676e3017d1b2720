use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use entity::ride_status_history::Column;

use crate::model::ride::RideStatusChange;

/// Read-only access to the ride audit trail.
///
/// History records are only ever written inside `RideRepository`
/// transactions; this repository exists for the read path.
pub struct RideStatusHistoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RideStatusHistoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a ride's transitions in insertion order, which is also the
    /// causal order of the transitions.
    ///
    /// # Arguments
    /// - `ride_id`: Ride whose trail to read
    ///
    /// # Returns
    /// - `Ok(Vec<RideStatusChange>)`: The transitions, oldest first
    /// - `Err(DbErr)`: Database error
    pub async fn list_for_ride(&self, ride_id: i32) -> Result<Vec<RideStatusChange>, DbErr> {
        let rows = entity::prelude::RideStatusHistory::find()
            .filter(Column::RideId.eq(ride_id))
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        Ok(rows.into_iter().map(RideStatusChange::from_entity).collect())
    }
}

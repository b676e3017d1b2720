//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds the shared resources
//! the service layer needs. The state is initialized once during startup and
//! then cloned per request by the embedding API layer.
//!
//! Services are constructed per call against the handles held here - there
//! are no process-global service instances.

use sea_orm::DatabaseConnection;

use crate::service::chat::{hub::ChatHub, rate_limit::RateLimiter};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `RateLimiter` and `ChatHub` share their interior state via `Arc`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Sliding-window rate limiter for chat messages.
    ///
    /// Shared across requests so that a user's message budget is enforced
    /// process-wide rather than per connection.
    pub chat_limiter: RateLimiter,

    /// Broadcast hub delivering chat events to realtime subscribers.
    pub chat_hub: ChatHub,
}

impl AppState {
    /// Creates application state around an established database connection.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            chat_limiter: RateLimiter::default(),
            chat_hub: ChatHub::default(),
        }
    }
}

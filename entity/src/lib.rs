//! SeaORM entity models for the ride backend.
//!
//! Entities mirror the database schema one-to-one. Domain models live in the
//! main crate's `model` layer; repositories convert between the two at the
//! data-layer boundary.

pub mod prelude;

pub mod chat_message;
pub mod ride;
pub mod ride_status_history;

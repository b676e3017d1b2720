//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with
//! sensible defaults, reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let ride = factory::ride::create_ride(&db).await?;
//!     let message = factory::chat_message::create_message(&db, ride.id, ride.client_id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! use entity::ride::RideStatus;
//! use test_utils::factory::ride::RideFactory;
//!
//! let ride = RideFactory::new(&db)
//!     .status(RideStatus::Accepted)
//!     .driver_profile_id(Some(5))
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `ride` - Create ride entities in any lifecycle status
//! - `chat_message` - Create chat message entities
//! - `helpers` - Unique-id generation shared by the factories

pub mod chat_message;
pub mod helpers;
pub mod ride;

// Re-export commonly used factory functions for concise usage
pub use chat_message::create_message;
pub use ride::create_ride;

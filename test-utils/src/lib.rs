//! Rideboard Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests
//! for the ride backend. This crate offers a builder pattern for creating
//! test contexts with in-memory SQLite databases, plus entity factories with
//! auto-unique defaults.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and setup
//! - **Factories**: Helpers creating entities with sensible defaults
//!
//! # Usage
//!
//! Use `TestBuilder` to create a test context with the required database
//! tables:
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_ride_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_ride_tables()
//!         .build()
//!         .await?;
//!
//!     let db = test.db.as_ref().unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;

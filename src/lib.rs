//! Ride lifecycle backend core.
//!
//! This crate implements the ride side of a ride-hailing backend: a
//! concurrency-safe ride status machine, an arbiter for racing driver
//! acceptances, a dispatch feed query, and the per-ride chat subsystem
//! (moderation, rate limiting, history, realtime fan-out). HTTP routing and
//! authentication are deliberately not part of this crate; an API layer is
//! expected to call into the service layer and map outcomes to responses.
//!
//! # Architecture
//!
//! The crate follows a layered architecture with clear separation of concerns:
//!
//! - **Service Layer** (`service/`) - Business logic orchestration; the only
//!   sanctioned entry points for ride mutations and chat operations
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain
//!   model conversion
//! - **Model Layer** (`model/`) - Domain models, operation parameter types,
//!   and the ride status transition table
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB handle, chat rate
//!   limiter, chat hub)
//! - **Startup** (`startup`) - Database connection and migration bootstrap
//!
//! # Request Flow
//!
//! A typical mutation flows through these layers:
//!
//! 1. The API layer validates a request body and calls a service method
//! 2. **Service** applies business rules (transition table, moderation, rate
//!    limits) and delegates to a repository
//! 3. **Data** executes the operation as a single transaction - row lock,
//!    conditional update, audit insert - and converts entities to domain
//!    models
//! 4. **Service** logs the outcome and returns it for the API layer to map
//!    to a response

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod state;

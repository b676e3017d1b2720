//! Service layer for business logic and orchestration.
//!
//! Services sit between the embedding API layer and the data (repository)
//! layer. They are responsible for:
//!
//! - **Business Rules**: The status transition table, chat moderation, and
//!   rate limiting
//! - **Orchestration**: Coordinating repository calls and realtime fan-out
//! - **Domain Models**: Working with domain models rather than entities
//!
//! Services hold no state of their own; they are constructed per call
//! against the handles in [`AppState`](crate::state::AppState).

pub mod chat;
pub mod ride;

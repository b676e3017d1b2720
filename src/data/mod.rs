//! Database repository layer.
//!
//! This module contains repository structs that execute all queries and
//! mutations. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Every
//! ride mutation runs as a single transaction combining the row lock, the
//! conditional update, and the audit-trail insert.

pub mod chat_message;
pub mod ride;
pub mod ride_history;

#[cfg(test)]
mod test;

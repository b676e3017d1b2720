//! Domain models and operation parameter types.
//!
//! Models here are plain data converted from entity models at the repository
//! boundary. The ride status transition table also lives here: it is pure
//! domain logic with no storage dependency.

pub mod chat;
pub mod ride;

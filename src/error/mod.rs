//! Error types for the ride backend.
//!
//! This module provides the application's error hierarchy. The `AppError`
//! enum serves as the top-level error type that wraps domain-specific errors
//! and request-level rejections. The HTTP layer consuming this crate is
//! expected to map variants to status codes; the intended mapping is noted on
//! each variant.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application.
/// Infrastructure variants use `#[from]` for automatic conversion; the
/// request-level variants carry a message intended for the client.
///
/// Expected outcomes under concurrency - a rejected transition, a lost
/// acceptance race - are deliberately NOT errors; they are encoded in the
/// return values of the service layer (`Option`, `AcceptOutcome`).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Always results in 500 Internal Server Error as configuration issues
    /// prevent normal application operation.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged
    /// server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message. Raised
    /// before any storage access, e.g. when chat moderation rejects a
    /// message.
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),

    /// Rate limit exceeded.
    ///
    /// Results in 429 Too Many Requests. Routine under load and never logged
    /// above debug level.
    ///
    /// # Fields
    /// - Message describing the exceeded limit
    #[error("{0}")]
    RateLimited(String),
}

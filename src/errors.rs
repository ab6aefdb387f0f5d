//! Unified error types for the budget tracker.
//!
//! All fallible operations in the crate return [`Result`], which wraps this
//! module's [`Error`] enum. Store and configuration failures carry enough
//! context to be logged or shown to an operator directly.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Local store file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Local store file could not be serialized or deserialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No team exists with the given id.
    #[error("Team not found: {id}")]
    TeamNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// No member exists with the given id.
    #[error("Member not found: {id}")]
    MemberNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// No expenditure exists with the given id.
    #[error("Expenditure not found: {id}")]
    ExpenditureNotFound {
        /// The id that failed to resolve
        id: String,
    },

    /// A monetary amount was negative, NaN, or infinite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected value
        amount: f64,
    },

    /// An expenditure quantity was negative.
    #[error("Invalid quantity: {quantity}")]
    InvalidQuantity {
        /// The rejected value
        quantity: i32,
    },

    /// A calendar value (date string, month index) was out of range.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The rejected value
        value: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

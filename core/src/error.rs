// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors raised by the calendar core and its storage.
#[derive(Debug, Error)]
pub enum Error {
    /// The recurrence rule cannot produce occurrences.
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),

    /// The event draft or patch breaks an event invariant.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// A scope-one change was requested without naming the occurrence.
    #[error("event '{0}' is recurring, an occurrence must be given to change only one")]
    MissingOccurrence(String),

    /// No stored event has the given id.
    #[error("event not found: {0}")]
    NotFound(String),

    /// The id is neither a stored id nor an occurrence id.
    #[error("invalid event id: {0}")]
    InvalidId(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("date-time error: {0}")]
    Time(#[from] jiff::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calendar operations.
pub type Result<T> = std::result::Result<T, Error>;

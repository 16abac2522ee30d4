// SPDX-FileCopyrightText: 2026 Datokit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the datokit plugin kit.

use thiserror::Error;

/// The primary error type returned by registration calls, installed hooks,
/// and the connect entry point.
#[derive(Debug, Error)]
pub enum KitError {
    /// A required registration field was empty.
    #[error("{entity} requires field \"{field}\"")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// An ID was registered twice while the duplicate policy is `throw`.
    #[error("{entity} with id \"{id}\" is already registered")]
    DuplicateId { entity: String, id: String },

    /// A singleton registration was configured twice while the duplicate
    /// policy is `throw`.
    #[error("{what} is already configured")]
    AlreadyConfigured { what: &'static str },

    /// An unrecognized dropdown action type tag.
    #[error("unknown dropdown action type: {0}")]
    UnknownActionType(String),

    /// Placeholder registration that always fails.
    #[error("{0} not yet implemented")]
    NotImplemented(&'static str),

    /// The default renderer could not locate its mount anchor.
    #[error("root element with id \"{id}\" not found")]
    MountNotFound { id: String },

    /// A user-supplied component, action, or lifecycle handler failed.
    #[error("handler error: {message}")]
    Handler {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The host SDK rejected or failed the connect call.
    #[error("sdk error: {message}")]
    Sdk {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid plugin options.
    #[error("configuration error: {0}")]
    Config(String),
}

impl KitError {
    /// Shorthand for a handler failure without an underlying source.
    pub fn handler(message: impl Into<String>) -> Self {
        KitError::Handler {
            message: message.into(),
            source: None,
        }
    }
}

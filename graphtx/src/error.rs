// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for GraphTx

use thiserror::Error;

use crate::result::RemoteError;

/// Result type alias for GraphTx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for GraphTx operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more `${name}` placeholders had no substitution
    #[error("{}", unmatched_message(.names))]
    UnmatchedSubstitution { names: Vec<String> },

    /// An operation that needs an open transaction was called without one
    #[error("{operation} requires a transaction id")]
    MissingTransaction { operation: &'static str },

    /// A positional argument list had arguments no classification rule accepts
    #[error("unclassified arguments: {}", .kinds.join(", "))]
    UnclassifiedArguments { kinds: Vec<&'static str> },

    /// Connection-level failure; the response body was never received
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status whose body was not a transaction response
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The endpoint answered but reported statement errors
    #[error("{}", remote_message(.errors))]
    Remote { errors: Vec<RemoteError> },

    /// Response was well formed but lacked something the operation needs
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// True for errors detected locally before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::UnmatchedSubstitution { .. }
                | Error::MissingTransaction { .. }
                | Error::UnclassifiedArguments { .. }
        )
    }
}

fn unmatched_message(names: &[String]) -> String {
    let noun = if names.len() > 1 {
        "substitutions"
    } else {
        "substitution"
    };
    format!("unmatched {}: {}", noun, names.join(", "))
}

fn remote_message(errors: &[RemoteError]) -> String {
    match errors.first() {
        Some(first) if errors.len() > 1 => format!(
            "endpoint reported {} errors, first: {}: {}",
            errors.len(),
            first.code,
            first.message
        ),
        Some(first) => format!("endpoint reported an error: {}: {}", first.code, first.message),
        None => "endpoint reported an error".to_string(),
    }
}

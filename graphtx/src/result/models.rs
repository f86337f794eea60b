// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;
use crate::statement::Statement;

/// One row: column name to value
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Rows produced by one statement
pub type ResultGroup = Vec<Record>;

/// One group per submitted statement, in submission order
pub type QueryResult = Vec<ResultGroup>;

/// Outcome of any transactional operation
pub type OperationResult = std::result::Result<QueryOutcome, QueryFailure>;

/// Error descriptor reported by the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// `transaction` member of an endpoint response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionExpiry {
    pub expires: String,
}

/// Body returned by every transactional endpoint variant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionResponse {
    /// Raw per-statement results; shape is checked by the normalizer
    #[serde(default)]
    pub results: serde_json::Value,
    #[serde(default)]
    pub errors: Vec<RemoteError>,
    /// Commit URI of a newly opened transaction
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub transaction: Option<TransactionExpiry>,
}

impl TransactionResponse {
    pub fn expires(&self) -> Option<String> {
        self.transaction.as_ref().map(|t| t.expires.clone())
    }
}

/// What was sent and what is known about the transaction after an operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseInfo {
    pub statements: Vec<Statement>,
    /// Errors reported by the endpoint; empty for local and transport failures
    pub errors: Vec<RemoteError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<u64>,
    /// Expiry as sent by the endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
}

impl ResponseInfo {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            ..Self::default()
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<FixedOffset>> {
        self.expires.as_deref().and_then(parse_expiry)
    }
}

/// Successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub results: QueryResult,
    pub info: ResponseInfo,
}

impl QueryOutcome {
    /// Transaction the operation ran in, if one is known
    pub fn transaction(&self) -> Option<TransactionHandle> {
        self.info.transaction_id.map(|id| TransactionHandle {
            id,
            expires: self.info.expires.clone(),
        })
    }
}

/// Failed operation; the result paired with a failure is always empty
#[derive(Debug)]
pub struct QueryFailure {
    pub error: Error,
    pub info: ResponseInfo,
}

impl QueryFailure {
    pub fn new(error: Error, info: ResponseInfo) -> Self {
        Self { error, info }
    }

    /// Failure detected before anything was sent
    pub fn local(error: Error, statements: Vec<Statement>) -> Self {
        Self::new(error, ResponseInfo::new(statements))
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl std::error::Error for QueryFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Transaction id round-tripped by the caller, with the last known expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHandle {
    pub id: u64,
    pub expires: Option<String>,
}

impl TransactionHandle {
    pub fn expires_at(&self) -> Option<DateTime<FixedOffset>> {
        self.expires.as_deref().and_then(parse_expiry)
    }
}

/// Expiry timestamps are RFC 2822 dates, e.g. `Tue, 21 Oct 2025 10:15:00 +0000`
fn parse_expiry(expires: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(expires).ok()
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Boundary to the remote transactional endpoint
//!
//! The coordinator only knows the five endpoint variants ([`Route`]) and
//! the decoded [`TransactionResponse`]. How bytes move is up to the
//! [`QueryEndpoint`] implementation; [`HttpEndpoint`] is the production one.

pub mod http;

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::result::TransactionResponse;
use crate::statement::Statement;

pub use http::HttpEndpoint;

/// Endpoint variant an operation is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `POST /commit` - run and commit in one round trip
    AutoCommit,
    /// `POST /` - open a new transaction
    Begin,
    /// `POST /{id}` - run inside an open transaction
    Execute(u64),
    /// `POST /{id}/commit`
    Commit(u64),
    /// `DELETE /{id}`
    Rollback(u64),
}

impl Route {
    /// Path relative to the transaction collection
    pub fn path(&self) -> String {
        match self {
            Route::AutoCommit => "/commit".to_string(),
            Route::Begin => String::new(),
            Route::Execute(id) | Route::Rollback(id) => format!("/{}", id),
            Route::Commit(id) => format!("/{}/commit", id),
        }
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Route::Rollback(_))
    }

    /// Transaction this route addresses, if any
    pub fn transaction_id(&self) -> Option<u64> {
        match self {
            Route::Execute(id) | Route::Commit(id) | Route::Rollback(id) => Some(*id),
            Route::AutoCommit | Route::Begin => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = if self.is_delete() { "DELETE" } else { "POST" };
        write!(f, "{} {}", method, self.path())
    }
}

/// JSON body of every POST variant
#[derive(Debug, Serialize)]
pub struct StatementsBody<'a> {
    pub statements: &'a [Statement],
}

/// Decoded reply plus the transport details the coordinator needs
#[derive(Debug, Clone, Default)]
pub struct EndpointReply {
    pub status: u16,
    /// `Location` header, set when a transaction is opened
    pub location: Option<String>,
    pub response: TransactionResponse,
}

/// Sends statements to one endpoint variant.
///
/// An `Err` means no usable response was received. Endpoint-reported
/// statement errors are part of a successful reply.
#[async_trait]
pub trait QueryEndpoint: Send + Sync {
    async fn send(&self, route: Route, statements: &[Statement]) -> Result<EndpointReply>;
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Transaction lifecycle
//!
//! A transaction id moves through `Unopened -> Open -> {Committed, RolledBack}`.
//! `begin` opens it, `query` and `reset_timeout` keep it open and refresh its
//! expiry, `commit` and `rollback` close it. The coordinator itself is
//! stateless: the id is carried by the caller between operations, and using
//! a closed id is left for the endpoint to reject.

pub mod coordinator;
pub mod guard;

use std::fmt;

use crate::transport::HttpEndpoint;

pub use coordinator::TransactionCoordinator;
pub use guard::Transaction;

/// Coordinator talking HTTP, the usual entry point
pub type Client = TransactionCoordinator<HttpEndpoint>;

/// Public operations, for callers that dispatch dynamically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Query,
    Begin,
    Commit,
    Rollback,
    ResetTimeout,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Query => "query",
            Operation::Begin => "begin",
            Operation::Commit => "commit",
            Operation::Rollback => "rollback",
            Operation::ResetTimeout => "reset timeout",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

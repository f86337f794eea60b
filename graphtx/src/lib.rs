// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphTx - statement composition and transaction sequencing for a
//! transactional graph HTTP endpoint
//!
//! # Quick Start
//!
//! ```no_run
//! use graphtx::{Client, Request};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::connect("http://localhost:7474")?;
//!
//! // Auto-committed single statement
//! let results = client.query("MATCH (n) RETURN count(n) AS total").await?.results;
//! println!("{:?}", results[0][0].get("total"));
//!
//! // Multi-statement transaction
//! let (mut tx, _) = client.begin_transaction("CREATE (:A)").await?;
//! tx.query(
//!     Request::from_query("CREATE (:${label} {id: {id}})")
//!         .substitution("label", "B")
//!         .parameter("id", json!(1)),
//! )
//! .await?;
//! tx.commit("CREATE (:C)").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Request / Argument list
//!        │  ArgumentClassifier, Request builder
//!        ▼
//! RequestDescriptor
//!        │  StatementComposer (+ substitutions)
//!        ▼
//! Vec<Statement> ──► TransactionCoordinator ──► QueryEndpoint (HTTP)
//!                           │
//!                           ▼
//!                    normalize_results ──► QueryOutcome / QueryFailure
//! ```
//!
//! # Module Organization
//!
//! - [`request`] - argument classification and the typed request builder
//! - [`statement`] - statement payloads, substitutions and composition
//! - [`result`] - normalized results, response metadata, failures
//! - [`transaction`] - the coordinator and the transaction guard
//! - [`transport`] - endpoint boundary and its HTTP implementation
//! - [`config`] - per-client configuration
//! - [`error`] - error types

pub mod config;
pub mod error;
pub mod escape;
pub mod request;
pub mod result;
pub mod statement;
pub mod transaction;
pub mod transport;

pub use config::{ClientConfig, ClientConfigBuilder, Credentials};
pub use error::{Error, Result};
pub use escape::escape_identifier;
pub use request::{Argument, ArgumentClassifier, Completion, Request, RequestDescriptor};
pub use result::{
    normalize_results, OperationResult, QueryFailure, QueryOutcome, QueryResult, Record,
    RemoteError, ResponseInfo, TransactionHandle,
};
pub use statement::{apply_substitutions, Parameters, Statement, StatementComposer, Substitutions};
pub use transaction::{Client, Operation, Transaction, TransactionCoordinator};
pub use transport::{HttpEndpoint, QueryEndpoint, Route};

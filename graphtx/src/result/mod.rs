// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query results, response metadata and failure reporting

pub mod models;
pub mod normalize;

pub use models::{
    OperationResult, QueryFailure, QueryOutcome, Record, RemoteError, ResponseInfo, ResultGroup,
    QueryResult, TransactionExpiry, TransactionHandle, TransactionResponse,
};
pub use normalize::normalize_results;

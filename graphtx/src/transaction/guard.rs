// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed handle over one open transaction

use super::TransactionCoordinator;
use crate::request::Request;
use crate::result::{OperationResult, TransactionHandle};
use crate::transport::QueryEndpoint;

/// An open transaction.
///
/// `commit` and `rollback` consume the guard, so a closed transaction cannot
/// be used again through it. Dropping the guard sends nothing; the endpoint
/// expires the transaction on its own.
#[derive(Debug)]
pub struct Transaction<'c, E> {
    coordinator: &'c TransactionCoordinator<E>,
    handle: TransactionHandle,
}

impl<'c, E: QueryEndpoint> Transaction<'c, E> {
    pub(crate) fn new(coordinator: &'c TransactionCoordinator<E>, handle: TransactionHandle) -> Self {
        Self {
            coordinator,
            handle,
        }
    }

    pub fn id(&self) -> u64 {
        self.handle.id
    }

    /// Id and last known expiry
    pub fn handle(&self) -> &TransactionHandle {
        &self.handle
    }

    pub async fn query(&mut self, request: impl Into<Request>) -> OperationResult {
        let request = request.into().transaction(self.handle.id);
        let result = self.coordinator.query(request).await;
        self.refresh(&result);
        result
    }

    pub async fn reset_timeout(&mut self) -> OperationResult {
        let result = self.coordinator.reset_timeout(self.handle.id).await;
        self.refresh(&result);
        result
    }

    pub async fn commit(self, request: impl Into<Request>) -> OperationResult {
        let request = request.into().transaction(self.handle.id);
        self.coordinator.commit(request).await
    }

    pub async fn rollback(self) -> OperationResult {
        self.coordinator.rollback(self.handle.id).await
    }

    fn refresh(&mut self, result: &OperationResult) {
        let info = match result {
            Ok(outcome) => &outcome.info,
            Err(failure) => &failure.info,
        };
        if let Some(expires) = &info.expires {
            self.handle.expires = Some(expires.clone());
        }
    }
}

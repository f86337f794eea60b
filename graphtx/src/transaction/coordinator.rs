// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
use log::{debug, warn};

use super::{Operation, Transaction};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::request::{Argument, ArgumentClassifier, ClassifiedArguments, Request, RequestDescriptor};
use crate::result::{
    normalize_results, OperationResult, QueryFailure, QueryOutcome, QueryResult, ResponseInfo,
};
use crate::statement::StatementComposer;
use crate::transport::{EndpointReply, HttpEndpoint, QueryEndpoint, Route};

/// Sequences statements against the transactional endpoint.
///
/// Every operation is one round trip. Nothing is cached between calls, so a
/// coordinator can be shared freely across tasks and many transactions can
/// be open at once.
#[derive(Debug, Clone)]
pub struct TransactionCoordinator<E> {
    endpoint: E,
}

impl TransactionCoordinator<HttpEndpoint> {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_endpoint(HttpEndpoint::new(config)?))
    }

    /// Client for `base_url` with default settings
    pub fn connect(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ClientConfig::builder().base_url(base_url).build()?)
    }
}

impl<E: QueryEndpoint> TransactionCoordinator<E> {
    pub fn with_endpoint(endpoint: E) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Run statements, inside the request's transaction if it names one,
    /// otherwise committing them in a single round trip.
    pub async fn query(&self, request: impl Into<Request>) -> OperationResult {
        self.run(Operation::Query, request.into().into_descriptor())
            .await
    }

    /// Open a new transaction, optionally running statements in it.
    ///
    /// A transaction id on the request is ignored.
    pub async fn begin(&self, request: impl Into<Request>) -> OperationResult {
        self.run(Operation::Begin, request.into().into_descriptor())
            .await
    }

    /// Run any final statements and commit the request's transaction
    pub async fn commit(&self, request: impl Into<Request>) -> OperationResult {
        self.run(Operation::Commit, request.into().into_descriptor())
            .await
    }

    pub async fn rollback(&self, transaction_id: u64) -> OperationResult {
        self.run(
            Operation::Rollback,
            RequestDescriptor::for_transaction(transaction_id),
        )
        .await
    }

    /// Keep a transaction alive without doing any work
    pub async fn reset_timeout(&self, transaction_id: u64) -> OperationResult {
        self.run(
            Operation::ResetTimeout,
            RequestDescriptor::for_transaction(transaction_id),
        )
        .await
    }

    /// Open a transaction and wrap it in a [`Transaction`] guard.
    ///
    /// Returns the guard together with the results of any statements run
    /// on begin.
    pub async fn begin_transaction(
        &self,
        request: impl Into<Request>,
    ) -> std::result::Result<(Transaction<'_, E>, QueryResult), QueryFailure> {
        let outcome = self.begin(request).await?;
        match outcome.transaction() {
            Some(handle) => Ok((Transaction::new(self, handle), outcome.results)),
            None => Err(QueryFailure::new(
                Error::InvalidResponse("no transaction id returned".into()),
                outcome.info,
            )),
        }
    }

    /// Run an operation from a positional argument list.
    ///
    /// A [`Argument::Handler`] at the end of the list is called exactly once
    /// with the outcome, which is then also returned. Arguments that fit no
    /// position fail the call locally and nothing is sent.
    pub async fn dispatch(&self, operation: Operation, arguments: Vec<Argument>) -> OperationResult {
        let classified = ArgumentClassifier::classify(arguments);
        let kinds = classified.unclassified_kinds();
        let ClassifiedArguments {
            descriptor,
            handler,
            ..
        } = classified;

        let result = if kinds.is_empty() {
            self.run(operation, descriptor).await
        } else {
            Err(QueryFailure::local(
                Error::UnclassifiedArguments { kinds },
                descriptor.statements,
            ))
        };
        if let Some(handler) = handler {
            handler(&result);
        }
        result
    }

    async fn run(&self, operation: Operation, mut descriptor: RequestDescriptor) -> OperationResult {
        let route = match (operation, descriptor.transaction_id) {
            (Operation::Query, None) => Route::AutoCommit,
            (Operation::Query, Some(id)) => Route::Execute(id),
            (Operation::Begin, _) => Route::Begin,
            (Operation::Commit, Some(id)) => Route::Commit(id),
            (Operation::Rollback, Some(id)) => Route::Rollback(id),
            (Operation::ResetTimeout, Some(id)) => Route::Execute(id),
            (Operation::Commit | Operation::Rollback | Operation::ResetTimeout, None) => {
                return Err(QueryFailure::local(
                    Error::MissingTransaction {
                        operation: operation.name(),
                    },
                    descriptor.statements,
                ));
            }
        };

        if matches!(operation, Operation::Rollback | Operation::ResetTimeout) {
            descriptor.statements.clear();
        }

        self.execute(route, descriptor).await
    }

    async fn execute(&self, route: Route, descriptor: RequestDescriptor) -> OperationResult {
        let statements = match StatementComposer::compose_request(&descriptor) {
            Ok(statements) => statements,
            Err(error) => return Err(QueryFailure::local(error, descriptor.statements)),
        };

        let reply = match self.endpoint.send(route, &statements).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!("{} failed before a response was received: {}", route, error);
                return Err(QueryFailure::new(error, ResponseInfo::new(statements)));
            }
        };

        let transaction_id = match route {
            Route::Begin => opened_transaction_id(&reply),
            other => other.transaction_id(),
        };
        let EndpointReply {
            status, response, ..
        } = reply;

        let info = ResponseInfo {
            statements,
            expires: response.expires(),
            errors: response.errors,
            transaction_id,
        };

        if !info.errors.is_empty() {
            warn!(
                "{} reported {} error(s) with status {}",
                route,
                info.errors.len(),
                status
            );
            let errors = info.errors.clone();
            return Err(QueryFailure::new(Error::Remote { errors }, info));
        }

        if route == Route::Begin {
            match transaction_id {
                Some(id) => debug!("Opened transaction {}", id),
                None => {
                    return Err(QueryFailure::new(
                        Error::InvalidResponse(
                            "begin response has no commit URI or Location".into(),
                        ),
                        info,
                    ))
                }
            }
        }

        Ok(QueryOutcome {
            results: normalize_results(&response.results),
            info,
        })
    }
}

/// Id of a freshly opened transaction, from the commit URI or the Location header
fn opened_transaction_id(reply: &EndpointReply) -> Option<u64> {
    reply
        .response
        .commit
        .as_deref()
        .and_then(transaction_id_from_uri)
        .or_else(|| reply.location.as_deref().and_then(transaction_id_from_uri))
}

/// `.../transaction/{id}` or `.../transaction/{id}/commit` -> `{id}`
fn transaction_id_from_uri(uri: &str) -> Option<u64> {
    let trimmed = uri.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/commit").unwrap_or(trimmed);
    trimmed.rsplit('/').next()?.parse().ok()
}

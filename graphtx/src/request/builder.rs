// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Typed request builder

use super::RequestDescriptor;
use crate::statement::{join_lines, Parameters, Statement, Substitutions};

/// Fluent builder for a [`RequestDescriptor`]
///
/// ```no_run
/// use graphtx::Request;
/// use serde_json::json;
///
/// let request = Request::new()
///     .lines(["MATCH (n:${label})", "WHERE n.id = {id}", "RETURN n"])
///     .substitution("label", "Person")
///     .parameter("id", json!(7));
/// ```
///
/// Pre-built statements win over query text; query text alone becomes a
/// single statement carrying the request's parameters.
#[derive(Debug, Clone, Default)]
pub struct Request {
    transaction_id: Option<u64>,
    query: Option<String>,
    parameters: Parameters,
    substitutions: Substitutions,
    statements: Option<Vec<Statement>>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that runs `query` with no parameters
    pub fn from_query(query: impl Into<String>) -> Self {
        Self::new().query(query)
    }

    /// Request that runs pre-built statements
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self::new().statements(statements)
    }

    /// Scope the request to an open transaction
    pub fn transaction(mut self, transaction_id: u64) -> Self {
        self.transaction_id = Some(transaction_id);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the query from lines joined with newlines; no lines clears it
    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().peekable();
        self.query = match lines.peek() {
            Some(_) => Some(join_lines(lines)),
            None => None,
        };
        self
    }

    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn substitutions<I, K, V>(mut self, substitutions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.substitutions = substitutions
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn substitution(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(name.into(), value.into());
        self
    }

    pub fn statements(mut self, statements: Vec<Statement>) -> Self {
        self.statements = Some(statements);
        self
    }

    /// Append one pre-built statement
    pub fn statement(mut self, statement: Statement) -> Self {
        self.statements.get_or_insert_with(Vec::new).push(statement);
        self
    }

    pub fn transaction_id(&self) -> Option<u64> {
        self.transaction_id
    }

    pub fn into_descriptor(self) -> RequestDescriptor {
        let statements = match (self.statements, &self.query) {
            (Some(statements), _) => statements,
            (None, Some(query)) => vec![Statement::with_parameters(
                query.clone(),
                self.parameters.clone(),
            )],
            (None, None) => Vec::new(),
        };

        RequestDescriptor {
            transaction_id: self.transaction_id,
            query: self.query,
            parameters: self.parameters,
            substitutions: self.substitutions,
            statements,
        }
    }
}

impl From<&str> for Request {
    fn from(query: &str) -> Self {
        Request::from_query(query)
    }
}

impl From<String> for Request {
    fn from(query: String) -> Self {
        Request::from_query(query)
    }
}

impl From<Statement> for Request {
    fn from(statement: Statement) -> Self {
        Request::from_statements(vec![statement])
    }
}

impl From<Vec<Statement>> for Request {
    fn from(statements: Vec<Statement>) -> Self {
        Request::from_statements(statements)
    }
}

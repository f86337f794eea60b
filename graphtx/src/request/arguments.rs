// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Positional argument classification
//!
//! Operations can be called with a flexible argument list. The meaning of
//! each argument follows from its kind and position:
//!
//! - a transaction id, if present, comes first
//! - a query string comes next
//! - a completion handler, if present, comes last
//! - a transaction id may instead trail the query and parameters,
//!   just before the handler
//! - the last mapping is the parameters, a mapping before it the substitutions
//! - a list of lines is joined into the query, a list of statements is used as is
//!
//! The rules run once each, in the order below, consuming arguments from the
//! front and the back of the list.

use std::collections::VecDeque;
use std::fmt;

use log::debug;

use super::RequestDescriptor;
use crate::result::OperationResult;
use crate::statement::{join_lines, Parameters, Statement, Substitutions};

/// Handler invoked once with the outcome of a dispatched operation
pub type Completion = Box<dyn FnOnce(&OperationResult) + Send>;

/// One positional argument of a dynamically shaped call
pub enum Argument {
    TransactionId(u64),
    Query(String),
    /// Query lines, joined with newlines
    Lines(Vec<String>),
    /// Pre-built statements
    Statements(Vec<Statement>),
    /// Parameters or substitutions, depending on position
    Map(Parameters),
    Handler(Completion),
}

impl Argument {
    pub fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&OperationResult) + Send + 'static,
    {
        Argument::Handler(Box::new(f))
    }

    fn kind(&self) -> &'static str {
        match self {
            Argument::TransactionId(_) => "transaction id",
            Argument::Query(_) => "query",
            Argument::Lines(_) => "lines",
            Argument::Statements(_) => "statements",
            Argument::Map(_) => "map",
            Argument::Handler(_) => "handler",
        }
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::TransactionId(id) => f.debug_tuple("TransactionId").field(id).finish(),
            Argument::Query(query) => f.debug_tuple("Query").field(query).finish(),
            Argument::Lines(lines) => f.debug_tuple("Lines").field(lines).finish(),
            Argument::Statements(statements) => {
                f.debug_tuple("Statements").field(statements).finish()
            }
            Argument::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Argument::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<u64> for Argument {
    fn from(id: u64) -> Self {
        Argument::TransactionId(id)
    }
}

impl From<&str> for Argument {
    fn from(query: &str) -> Self {
        Argument::Query(query.to_string())
    }
}

impl From<String> for Argument {
    fn from(query: String) -> Self {
        Argument::Query(query)
    }
}

impl From<Vec<String>> for Argument {
    fn from(lines: Vec<String>) -> Self {
        Argument::Lines(lines)
    }
}

impl From<Vec<&str>> for Argument {
    fn from(lines: Vec<&str>) -> Self {
        Argument::Lines(lines.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Statement>> for Argument {
    fn from(statements: Vec<Statement>) -> Self {
        Argument::Statements(statements)
    }
}

impl From<Parameters> for Argument {
    fn from(map: Parameters) -> Self {
        Argument::Map(map)
    }
}

/// Outcome of classification
pub struct ClassifiedArguments {
    pub descriptor: RequestDescriptor,
    pub handler: Option<Completion>,
    /// Arguments no rule accepted, in their original order
    pub unclassified: Vec<Argument>,
}

impl ClassifiedArguments {
    /// Kinds of the unclassified arguments, for error reporting
    pub fn unclassified_kinds(&self) -> Vec<&'static str> {
        self.unclassified.iter().map(Argument::kind).collect()
    }
}

impl fmt::Debug for ClassifiedArguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedArguments")
            .field("descriptor", &self.descriptor)
            .field("handler", &self.handler.is_some())
            .field("unclassified", &self.unclassified)
            .finish()
    }
}

/// Resolves positional arguments into a [`RequestDescriptor`]
pub struct ArgumentClassifier;

impl ArgumentClassifier {
    pub fn classify(arguments: Vec<Argument>) -> ClassifiedArguments {
        let mut input: VecDeque<Argument> = arguments.into();
        let mut descriptor = RequestDescriptor::default();
        let mut handler = None;

        // The first argument, when numeric, is the transaction id.
        if let Some(Argument::TransactionId(id)) = input.front() {
            descriptor.transaction_id = Some(*id);
            input.pop_front();
        }

        // Then the query string.
        if matches!(input.front(), Some(Argument::Query(_))) {
            if let Some(Argument::Query(query)) = input.pop_front() {
                descriptor.query = Some(query);
            }
        }

        // The last argument, when invocable, is the completion handler.
        if matches!(input.back(), Some(Argument::Handler(_))) {
            if let Some(Argument::Handler(completion)) = input.pop_back() {
                handler = Some(completion);
            }
        }

        // `(query, parameters, id, handler)`: an id left at the back, once
        // the handler is gone, is the transaction id.
        if descriptor.transaction_id.is_none() {
            if let Some(Argument::TransactionId(id)) = input.back() {
                descriptor.transaction_id = Some(*id);
                input.pop_back();
            }
        }

        // The last mapping is the parameters ...
        if matches!(input.back(), Some(Argument::Map(_))) {
            if let Some(Argument::Map(map)) = input.pop_back() {
                descriptor.parameters = map;
            }
        }

        // ... and a mapping still left behind it is the substitutions.
        if matches!(input.back(), Some(Argument::Map(_))) {
            if let Some(Argument::Map(map)) = input.pop_back() {
                descriptor.substitutions = substitutions_from_map(map);
            }
        }

        if matches!(input.front(), Some(Argument::Lines(_))) {
            if let Some(Argument::Lines(lines)) = input.pop_front() {
                // No lines means no query, so no statement is sent.
                if !lines.is_empty() {
                    descriptor.query = Some(join_lines(lines));
                }
            }
        }

        if matches!(input.front(), Some(Argument::Statements(_))) {
            if let Some(Argument::Statements(statements)) = input.pop_front() {
                descriptor.statements = statements;
            }
        } else if let Some(query) = &descriptor.query {
            descriptor.statements = vec![Statement::with_parameters(
                query.clone(),
                descriptor.parameters.clone(),
            )];
        }

        if !input.is_empty() {
            debug!(
                "{} unclassified argument(s): {:?}",
                input.len(),
                input.iter().map(Argument::kind).collect::<Vec<_>>()
            );
        }

        ClassifiedArguments {
            descriptor,
            handler,
            unclassified: input.into(),
        }
    }
}

/// Substitution values are text; other JSON values use their JSON rendering.
fn substitutions_from_map(map: Parameters) -> Substitutions {
    map.into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> Argument {
        Argument::Map(value.as_object().cloned().unwrap_or_default())
    }

    fn noop() -> Argument {
        Argument::handler(|_| {})
    }

    #[test]
    fn test_query_and_handler() {
        let classified = ArgumentClassifier::classify(vec!["query".into(), noop()]);
        let descriptor = classified.descriptor;

        assert!(classified.handler.is_some());
        assert_eq!(descriptor.transaction_id, None);
        assert_eq!(descriptor.query.as_deref(), Some("query"));
        assert_eq!(descriptor.statements, vec![Statement::new("query")]);
    }

    #[test]
    fn test_query_parameters_handler() {
        let classified = ArgumentClassifier::classify(vec![
            "query".into(),
            map(json!({ "foo": "bar" })),
            noop(),
        ]);
        let descriptor = classified.descriptor;

        assert!(classified.handler.is_some());
        assert_eq!(descriptor.statements.len(), 1);
        assert_eq!(
            descriptor.statements[0].parameters.get("foo"),
            Some(&json!("bar"))
        );
        assert!(descriptor.substitutions.is_empty());
    }

    #[test]
    fn test_transaction_query_parameters_handler() {
        let classified = ArgumentClassifier::classify(vec![
            4u64.into(),
            "query".into(),
            map(json!({ "foo": "bar" })),
            noop(),
        ]);
        let descriptor = classified.descriptor;

        assert_eq!(descriptor.transaction_id, Some(4));
        assert_eq!(descriptor.statements[0].statement, "query");
        assert_eq!(
            descriptor.statements[0].parameters.get("foo"),
            Some(&json!("bar"))
        );
    }

    #[test]
    fn test_two_maps_substitutions_then_parameters() {
        let classified = ArgumentClassifier::classify(vec![
            "MATCH (n:${label}) RETURN n".into(),
            map(json!({ "label": "Person" })),
            map(json!({ "id": 7 })),
            noop(),
        ]);
        let descriptor = classified.descriptor;

        assert_eq!(
            descriptor.substitutions.get("label").map(String::as_str),
            Some("Person")
        );
        assert_eq!(descriptor.parameters.get("id"), Some(&json!(7)));
        assert!(!descriptor.parameters.contains_key("label"));
    }

    #[test]
    fn test_lines_joined_into_query() {
        let classified =
            ArgumentClassifier::classify(vec![vec!["q1", "q2"].into(), noop()]);
        let descriptor = classified.descriptor;

        assert_eq!(descriptor.query.as_deref(), Some("q1\nq2"));
        assert_eq!(descriptor.statements, vec![Statement::new("q1\nq2")]);
    }

    #[test]
    fn test_prebuilt_statements_used_directly() {
        let statements = vec![Statement::new("test1"), Statement::new("test2")];
        let classified =
            ArgumentClassifier::classify(vec![statements.clone().into(), noop()]);

        assert_eq!(classified.descriptor.statements, statements);
        assert_eq!(classified.descriptor.query, None);
    }

    #[test]
    fn test_transaction_only_yields_no_statements() {
        let classified = ArgumentClassifier::classify(vec![1u64.into(), noop()]);

        assert_eq!(classified.descriptor.transaction_id, Some(1));
        assert!(classified.descriptor.statements.is_empty());
        assert!(classified.handler.is_some());
    }

    #[test]
    fn test_empty_after_handler() {
        let classified = ArgumentClassifier::classify(vec![noop()]);

        assert_eq!(classified.descriptor, RequestDescriptor::default());
        assert!(classified.handler.is_some());
    }

    #[test]
    fn test_leading_number_is_always_transaction_id() {
        let classified = ArgumentClassifier::classify(vec![42u64.into(), noop()]);

        assert_eq!(classified.descriptor.transaction_id, Some(42));
        assert_eq!(classified.descriptor.query, None);
    }

    #[test]
    fn test_query_parameters_trailing_transaction_handler() {
        let classified = ArgumentClassifier::classify(vec![
            "CREATE (:X {id: {id}})".into(),
            map(json!({ "id": 1 })),
            4u64.into(),
            noop(),
        ]);
        let descriptor = &classified.descriptor;

        assert!(classified.handler.is_some());
        assert!(classified.unclassified.is_empty());
        assert_eq!(descriptor.transaction_id, Some(4));
        assert_eq!(descriptor.parameters.get("id"), Some(&json!(1)));
        assert_eq!(
            descriptor.statements,
            vec![Statement::with_parameters(
                "CREATE (:X {id: {id}})",
                json!({ "id": 1 }).as_object().cloned().unwrap()
            )]
        );
    }

    #[test]
    fn test_query_trailing_transaction_handler() {
        let classified =
            ArgumentClassifier::classify(vec!["query".into(), 9u64.into(), noop()]);

        assert_eq!(classified.descriptor.transaction_id, Some(9));
        assert_eq!(classified.descriptor.statements, vec![Statement::new("query")]);
        assert!(classified.unclassified.is_empty());
    }

    #[test]
    fn test_leading_id_wins_over_trailing_id() {
        let classified = ArgumentClassifier::classify(vec![
            1u64.into(),
            "query".into(),
            2u64.into(),
            noop(),
        ]);

        assert_eq!(classified.descriptor.transaction_id, Some(1));
        assert_eq!(classified.unclassified_kinds(), vec!["transaction id"]);
    }

    #[test]
    fn test_unclassified_arguments_are_kept() {
        let classified = ArgumentClassifier::classify(vec![
            "first".into(),
            "second".into(),
            noop(),
        ]);

        assert_eq!(classified.descriptor.query.as_deref(), Some("first"));
        assert_eq!(classified.unclassified_kinds(), vec!["query"]);
        assert!(classified.handler.is_some());
    }

    #[test]
    fn test_empty_lines_yield_no_statements() {
        let classified = ArgumentClassifier::classify(vec![
            2u64.into(),
            Argument::Lines(vec![]),
            noop(),
        ]);

        assert_eq!(classified.descriptor.transaction_id, Some(2));
        assert_eq!(classified.descriptor.query, None);
        assert!(classified.descriptor.statements.is_empty());
        assert!(classified.unclassified.is_empty());
    }

    #[test]
    fn test_non_string_substitution_values() {
        let classified = ArgumentClassifier::classify(vec![
            "RETURN ${n}".into(),
            map(json!({ "n": 3 })),
            map(json!({})),
        ]);

        assert_eq!(
            classified.descriptor.substitutions.get("n").map(String::as_str),
            Some("3")
        );
        assert!(classified.handler.is_none());
    }
}

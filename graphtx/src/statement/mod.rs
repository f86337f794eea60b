// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement payloads and the client-side template machinery that builds them
//!
//! A [`Statement`] is the unit the endpoint executes: query text plus the
//! parameters bound server-side. Substitutions (`${name}`) are expanded on
//! the client before anything is sent; parameters are never touched.

pub mod composer;
pub mod substitutions;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use composer::StatementComposer;
pub use substitutions::apply_substitutions;

/// Server-side parameter bindings, keyed by parameter name
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// Client-side textual substitutions, keyed by placeholder name
pub type Substitutions = BTreeMap<String, String>;

/// A single query with its parameters, as sent to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub statement: String,
    #[serde(default)]
    pub parameters: Parameters,
}

impl Statement {
    /// Statement with no parameters
    pub fn new(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn with_parameters(statement: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            statement: statement.into(),
            parameters,
        }
    }
}

/// Join query lines with newline separators
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| line.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Request descriptors and the two ways of producing them
//!
//! - [`Request`] - typed builder, one method per logical argument
//! - [`ArgumentClassifier`] - resolves a positional [`Argument`] list using
//!   fixed front/back rules, for callers whose argument shape is only known
//!   at runtime
//!
//! Both yield the same [`RequestDescriptor`].

pub mod arguments;
pub mod builder;

use crate::statement::{Parameters, Statement, Substitutions};

pub use arguments::{Argument, ArgumentClassifier, ClassifiedArguments, Completion};
pub use builder::Request;

/// Canonical description of one operation's input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDescriptor {
    /// Open transaction the statements run in, if any
    pub transaction_id: Option<u64>,
    /// Query text, either given directly or joined from lines
    pub query: Option<String>,
    pub parameters: Parameters,
    pub substitutions: Substitutions,
    /// Statements to send, before substitution
    pub statements: Vec<Statement>,
}

impl RequestDescriptor {
    /// Descriptor carrying only a transaction id and no work
    pub fn for_transaction(transaction_id: u64) -> Self {
        Self {
            transaction_id: Some(transaction_id),
            ..Self::default()
        }
    }
}

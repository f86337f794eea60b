// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Statement composer
//!
//! Turns query templates (a single string or a list of lines) into
//! [`Statement`] payloads, expanding substitutions first. Validation is the
//! same whichever entry point is used, and always runs before a request is
//! built.

use super::{apply_substitutions, join_lines, Parameters, Statement, Substitutions};
use crate::error::Result;
use crate::request::RequestDescriptor;

/// Builds statement payloads from templates and request descriptors
pub struct StatementComposer;

impl StatementComposer {
    /// Build one statement from a template.
    ///
    /// `parameters` defaults to an empty mapping.
    pub fn compose(
        template: &str,
        substitutions: &Substitutions,
        parameters: Option<Parameters>,
    ) -> Result<Statement> {
        let statement = apply_substitutions(template, substitutions)?;
        Ok(Statement::with_parameters(
            statement,
            parameters.unwrap_or_default(),
        ))
    }

    /// Build one statement from query lines joined with newlines
    pub fn compose_lines<I, S>(
        lines: I,
        substitutions: &Substitutions,
        parameters: Option<Parameters>,
    ) -> Result<Statement>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::compose(&join_lines(lines), substitutions, parameters)
    }

    /// Continuation form of [`compose`](Self::compose): the outcome is
    /// handed to `then` exactly once and its return value passed back.
    pub fn compose_with<F, R>(
        template: &str,
        substitutions: &Substitutions,
        parameters: Option<Parameters>,
        then: F,
    ) -> R
    where
        F: FnOnce(Result<Statement>) -> R,
    {
        then(Self::compose(template, substitutions, parameters))
    }

    /// Build every statement a descriptor describes.
    ///
    /// Substitutions apply to each statement's text; parameters already
    /// attached to pre-built statements are kept as they are.
    pub fn compose_request(descriptor: &RequestDescriptor) -> Result<Vec<Statement>> {
        descriptor
            .statements
            .iter()
            .map(|statement| {
                Self::compose(
                    &statement.statement,
                    &descriptor.substitutions,
                    Some(statement.parameters.clone()),
                )
            })
            .collect()
    }
}

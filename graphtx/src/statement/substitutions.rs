// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Client-side `${name}` substitution
//!
//! Substitutions can appear anywhere in the query text (labels, relationship
//! types, property keys) where server-side parameters are not allowed. They
//! are a convenience only and give no plan-caching benefit.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Substitutions;
use crate::error::{Error, Result};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"));

/// Replace every `${key}` in `template` with its mapped value.
///
/// Replacement happens in one pass over the template, so substituted values
/// are never scanned again. Keys that do not occur in the template are
/// ignored. Any placeholder left without a value fails the whole call with
/// [`Error::UnmatchedSubstitution`] listing each missing name once, in order
/// of first appearance.
pub fn apply_substitutions(template: &str, substitutions: &Substitutions) -> Result<String> {
    let mut unmatched: Vec<String> = Vec::new();

    let expanded = PLACEHOLDER.replace_all(template, |caps: &Captures| {
        let name = &caps[1];
        match substitutions.get(name) {
            Some(value) => value.clone(),
            None => {
                if !unmatched.iter().any(|n| n == name) {
                    unmatched.push(name.to_string());
                }
                caps[0].to_string()
            }
        }
    });

    if !unmatched.is_empty() {
        return Err(Error::UnmatchedSubstitution { names: unmatched });
    }

    Ok(expanded.into_owned())
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Identifier quoting for labels, relationship types and property keys

/// Quote `identifier` for use as a schema name inside query text.
///
/// Every backtick is doubled and the result wrapped in backticks, whether
/// or not quoting was needed. Apply exactly once: quoting an already quoted
/// identifier quotes it again.
pub fn escape_identifier(identifier: &str) -> String {
    let mut escaped = String::with_capacity(identifier.len() + 2);
    escaped.push('`');
    escaped.push_str(&identifier.replace('`', "``"));
    escaped.push('`');
    escaped
}

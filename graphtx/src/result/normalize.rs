// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Column/row reshaping of endpoint results.
//!
//! The endpoint answers each statement with a `columns` list and a `data`
//! list whose rows are positional. Callers get one record per row instead,
//! keyed by column name.
//!
//! Normalization is total. Anything that does not look like the expected
//! shape yields an empty result rather than an error.

use log::debug;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::models::{QueryResult, Record, ResultGroup};

#[derive(Deserialize)]
struct RawGroup {
    columns: Vec<String>,
    data: Vec<RawRow>,
}

/// Rows arrive either as `{"row": [...], "meta": ...}` or as a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRow {
    Wrapped { row: Vec<JsonValue> },
    Bare(Vec<JsonValue>),
}

impl RawRow {
    fn values(self) -> Vec<JsonValue> {
        match self {
            RawRow::Wrapped { row } => row,
            RawRow::Bare(values) => values,
        }
    }
}

/// Reshape raw `results` into row records, or nothing if malformed.
pub fn normalize_results(raw: &JsonValue) -> QueryResult {
    let groups: Vec<RawGroup> = match Vec::<RawGroup>::deserialize(raw) {
        Ok(groups) => groups,
        Err(e) => {
            if !raw.is_null() {
                debug!("Unexpected result shape, returning no results: {}", e);
            }
            return Vec::new();
        }
    };

    groups.into_iter().map(normalize_group).collect()
}

fn normalize_group(group: RawGroup) -> ResultGroup {
    let RawGroup { columns, data } = group;
    data.into_iter()
        .map(|row| {
            columns
                .iter()
                .cloned()
                .zip(row.values())
                .collect::<Record>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_row() {
        let raw = json!([{ "columns": ["a", "b"], "data": [{ "row": [1, 2] }] }]);
        let results = normalize_results(&raw);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].len(), 1);
        assert_eq!(results[0][0].get("a"), Some(&json!(1)));
        assert_eq!(results[0][0].get("b"), Some(&json!(2)));
    }

    #[test]
    fn test_records_keep_column_order() {
        let raw = json!([{ "columns": ["name", "age", "city"], "data": [["Ann", 3, "Oslo"]] }]);
        let results = normalize_results(&raw);

        let keys: Vec<&str> = results[0][0].keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "age", "city"]);
    }

    #[test]
    fn test_bare_rows() {
        let raw = json!([{ "columns": ["a", "b"], "data": [[1, 2], [3, 4]] }]);
        let results = normalize_results(&raw);

        assert_eq!(results[0].len(), 2);
        assert_eq!(results[0][1].get("a"), Some(&json!(3)));
    }

    #[test]
    fn test_group_per_statement() {
        let raw = json!([
            { "columns": ["n"], "data": [{ "row": [{ "name": "A" }] }, { "row": [{ "name": "B" }] }] },
            { "columns": ["count"], "data": [] }
        ]);
        let results = normalize_results(&raw);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].len(), 2);
        assert_eq!(results[0][1].get("n"), Some(&json!({ "name": "B" })));
        assert!(results[1].is_empty());
    }

    #[test]
    fn test_row_length_mismatch() {
        let raw = json!([{ "columns": ["a", "b"], "data": [[1], [1, 2, 3]] }]);
        let results = normalize_results(&raw);

        assert_eq!(results[0][0].len(), 1);
        assert!(results[0][0].get("b").is_none());
        assert_eq!(results[0][1].len(), 2);
    }

    #[test]
    fn test_malformed_is_empty() {
        assert!(normalize_results(&json!("not results")).is_empty());
        assert!(normalize_results(&json!({ "columns": ["a"] })).is_empty());
        assert!(normalize_results(&json!([{ "columns": "a", "data": [] }])).is_empty());
        assert!(normalize_results(&json!([{ "data": [[1]] }])).is_empty());
        assert!(normalize_results(&JsonValue::Null).is_empty());
    }

    #[test]
    fn test_empty_results() {
        assert!(normalize_results(&json!([])).is_empty());
    }
}

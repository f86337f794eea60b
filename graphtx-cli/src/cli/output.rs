// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for terminal output

use comfy_table::{ContentArrangement, Table};
use graphtx::{QueryFailure, QueryOutcome, Record, TransactionHandle};
use serde_json::{json, Value as JsonValue};

use super::commands::OutputFormat;

pub struct ResultFormatter;

impl ResultFormatter {
    /// Render an outcome: one table per result group, or a single JSON document
    pub fn format(outcome: &QueryOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let mut document = json!({ "results": outcome.results });
                if let Some(handle) = outcome.transaction() {
                    document["transaction"] = json!(handle);
                }
                serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string())
            }
            OutputFormat::Table => {
                let mut sections: Vec<String> = outcome
                    .results
                    .iter()
                    .map(|group| Self::group_table(group))
                    .collect();
                if let Some(handle) = outcome.transaction() {
                    sections.push(Self::transaction_line(&handle));
                }
                sections.join("\n")
            }
        }
    }

    pub fn format_failure(failure: &QueryFailure, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let document = json!({
                    "error": failure.error.to_string(),
                    "errors": failure.info.errors,
                    "statements": failure.info.statements,
                });
                serde_json::to_string_pretty(&document).unwrap_or_else(|_| document.to_string())
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("Error: {}", failure.error)];
                lines.extend(failure.info.errors.iter().map(|e| format!("  {}", e)));
                lines.join("\n")
            }
        }
    }

    pub fn transaction_line(handle: &TransactionHandle) -> String {
        match &handle.expires {
            Some(expires) => format!("transaction {} (expires {})", handle.id, expires),
            None => format!("transaction {}", handle.id),
        }
    }

    fn group_table(group: &[Record]) -> String {
        if group.is_empty() {
            return "(no rows)".to_string();
        }

        // Columns in first-seen order, which is the query's column order;
        // a record may omit trailing columns
        let mut columns: Vec<&String> = Vec::new();
        for record in group {
            for key in record.keys() {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(columns.iter().map(|c| c.as_str()));
        for record in group {
            table.add_row(
                columns
                    .iter()
                    .map(|column| record.get(*column).map(Self::cell).unwrap_or_default()),
            );
        }

        format!("{}\n({} rows)", table, group.len())
    }

    fn cell(value: &JsonValue) -> String {
        match value {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}

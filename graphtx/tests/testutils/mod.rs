// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shared fixtures for endpoint-level tests
//!
//! `GraphResponder` emulates the transactional endpoint closely enough to
//! run whole begin/query/commit/rollback sequences: it understands
//! `CREATE (:Label)` and `MATCH (n) RETURN n` and keeps uncommitted nodes
//! per transaction.

#![allow(dead_code)]

use graphtx::{Client, ClientConfig};
use parking_lot::Mutex;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::path_regex;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const TRANSACTION_PATH: &str = "/db/data/transaction";

pub fn client_for(server: &MockServer) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .build()
        .expect("valid test config");
    Client::new(config).expect("client builds")
}

#[derive(Default)]
struct GraphState {
    next_id: u64,
    touches: u32,
    committed: Vec<String>,
    open: HashMap<u64, Vec<String>>,
}

/// In-memory transactional graph behind a wiremock server
#[derive(Clone, Default)]
pub struct GraphResponder {
    state: Arc<Mutex<GraphState>>,
}

impl GraphResponder {
    pub async fn mount(server: &MockServer) -> Self {
        let responder = Self::default();
        Mock::given(path_regex(format!("^{}", TRANSACTION_PATH)))
            .respond_with(responder.clone())
            .mount(server)
            .await;
        responder
    }

    pub fn committed(&self) -> Vec<String> {
        self.state.lock().committed.clone()
    }

    pub fn open_transactions(&self) -> usize {
        self.state.lock().open.len()
    }
}

fn statements_of(request: &Request) -> Vec<String> {
    serde_json::from_slice::<JsonValue>(&request.body)
        .ok()
        .and_then(|body| body.get("statements").cloned())
        .and_then(|statements| statements.as_array().cloned())
        .unwrap_or_default()
        .iter()
        .filter_map(|s| s.get("statement").and_then(JsonValue::as_str).map(str::to_string))
        .collect()
}

fn created_label(statement: &str) -> Option<String> {
    let rest = statement.trim().strip_prefix("CREATE (:")?;
    Some(rest.split(|c| c == ')' || c == ' ').next()?.to_string())
}

impl GraphState {
    fn expiry(&mut self) -> String {
        self.touches += 1;
        format!("Tue, 21 Oct 2025 10:{:02}:00 +0000", self.touches % 60)
    }

    /// Run statements against `visible` nodes, collecting new nodes into `created`
    fn run(visible: &[String], created: &mut Vec<String>, statements: &[String]) -> Vec<JsonValue> {
        statements
            .iter()
            .map(|statement| {
                if let Some(label) = created_label(statement) {
                    created.push(label);
                    json!({ "columns": [], "data": [] })
                } else {
                    let rows: Vec<JsonValue> = visible
                        .iter()
                        .chain(created.iter())
                        .map(|label| json!({ "row": [{ "label": label }] }))
                        .collect();
                    json!({ "columns": ["n"], "data": rows })
                }
            })
            .collect()
    }
}

fn not_found(id: u64) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "results": [],
        "errors": [{
            "code": "Neo.ClientError.Transaction.TransactionNotFound",
            "message": format!("Unrecognized transaction id. Transaction {} may have timed out and been rolled back.", id)
        }]
    }))
}

impl Respond for GraphResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.state.lock();
        let statements = statements_of(request);
        let rest = request.url.path()[TRANSACTION_PATH.len()..].trim_matches('/').to_string();
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        let is_delete = request.method.as_str() == "DELETE";

        match segments.as_slice() {
            // Single-shot commit
            ["commit"] => {
                let mut created = Vec::new();
                let results = GraphState::run(&state.committed, &mut created, &statements);
                state.committed.extend(created);
                ResponseTemplate::new(200).set_body_json(json!({ "results": results, "errors": [] }))
            }
            // Begin
            [] => {
                state.next_id += 1;
                let id = state.next_id;
                let mut created = Vec::new();
                let results = GraphState::run(&state.committed, &mut created, &statements);
                state.open.insert(id, created);
                let expires = state.expiry();
                ResponseTemplate::new(201)
                    .insert_header(
                        "Location",
                        format!("http://localhost:7474{}/{}", TRANSACTION_PATH, id).as_str(),
                    )
                    .set_body_json(json!({
                        "commit": format!("http://localhost:7474{}/{}/commit", TRANSACTION_PATH, id),
                        "results": results,
                        "transaction": { "expires": expires },
                        "errors": []
                    }))
            }
            [id] => {
                let Ok(id) = id.parse::<u64>() else {
                    return ResponseTemplate::new(400);
                };
                if is_delete {
                    return match state.open.remove(&id) {
                        Some(_) => ResponseTemplate::new(200)
                            .set_body_json(json!({ "results": [], "errors": [] })),
                        None => not_found(id),
                    };
                }
                let Some(mut pending) = state.open.remove(&id) else {
                    return not_found(id);
                };
                let results = GraphState::run(&state.committed, &mut pending, &statements);
                state.open.insert(id, pending);
                let expires = state.expiry();
                ResponseTemplate::new(200).set_body_json(json!({
                    "commit": format!("http://localhost:7474{}/{}/commit", TRANSACTION_PATH, id),
                    "results": results,
                    "transaction": { "expires": expires },
                    "errors": []
                }))
            }
            [id, "commit"] => {
                let Ok(id) = id.parse::<u64>() else {
                    return ResponseTemplate::new(400);
                };
                let Some(mut pending) = state.open.remove(&id) else {
                    return not_found(id);
                };
                let results = GraphState::run(&state.committed, &mut pending, &statements);
                state.committed.extend(pending);
                ResponseTemplate::new(200).set_body_json(json!({ "results": results, "errors": [] }))
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

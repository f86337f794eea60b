// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! reqwest-backed endpoint

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{ACCEPT, LOCATION};
use std::time::Instant;

use super::{EndpointReply, QueryEndpoint, Route, StatementsBody};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::result::TransactionResponse;
use crate::statement::Statement;

/// HTTP implementation of [`QueryEndpoint`].
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    config: ClientConfig,
    http_client: reqwest::Client,
}

impl HttpEndpoint {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, route: Route) -> String {
        format!("{}{}", self.config.transaction_url(), route.path())
    }
}

#[async_trait]
impl QueryEndpoint for HttpEndpoint {
    async fn send(&self, route: Route, statements: &[Statement]) -> Result<EndpointReply> {
        let url = self.url(route);
        let mut request = if route.is_delete() {
            self.http_client.delete(&url)
        } else {
            self.http_client
                .post(&url)
                .json(&StatementsBody { statements })
        };
        request = request.header(ACCEPT, "application/json; charset=UTF-8");
        if let Some(credentials) = self.config.credentials() {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        debug!("Sending {} ({} statements) to {}", route, statements.len(), url);
        let start = Instant::now();

        let response = request.send().await?;
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        debug!(
            "Response from {}: status={} duration_ms={}",
            route,
            status,
            start.elapsed().as_millis()
        );

        let parsed = if body.trim().is_empty() && status.is_success() {
            Ok(TransactionResponse::default())
        } else {
            serde_json::from_str::<TransactionResponse>(&body)
        };

        match parsed {
            // Statement errors may come with a non-success status; anything
            // else without them is a transport-level failure.
            Ok(response) if status.is_success() || !response.errors.is_empty() => {
                Ok(EndpointReply {
                    status: status.as_u16(),
                    location,
                    response,
                })
            }
            Err(e) if status.is_success() => Err(Error::Decode(e)),
            _ => {
                warn!("{} failed with status {}: {}", route, status, body);
                Err(Error::Http {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

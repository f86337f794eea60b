// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Per-client endpoint configuration

use std::time::Duration;

use crate::error::{Error, Result};

/// Default mount point of the transactional endpoint
pub const DEFAULT_TRANSACTION_PATH: &str = "/db/data/transaction";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variables read by [`ClientConfig::from_env`]
pub const URL_ENV: &str = "GRAPHTX_URL";
pub const USER_ENV: &str = "GRAPHTX_USER";
pub const PASSWORD_ENV: &str = "GRAPHTX_PASSWORD";

/// Basic authentication credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Where and how a client reaches the endpoint.
///
/// Owned by each client; two clients never share a location.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    transaction_path: String,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build from `GRAPHTX_URL`, `GRAPHTX_USER` and `GRAPHTX_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Ok(url) = std::env::var(URL_ENV) {
            builder = builder.base_url(url);
        }
        if let Ok(user) = std::env::var(USER_ENV) {
            let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
            builder = builder.basic_auth(user, password);
        }
        builder.build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// URL of the transaction collection, e.g. `http://host:7474/db/data/transaction`
    pub fn transaction_url(&self) -> String {
        format!("{}{}", self.base_url, self.transaction_path)
    }
}

/// Builder for [`ClientConfig`]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    transaction_path: String,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            transaction_path: DEFAULT_TRANSACTION_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
        }
    }
}

impl ClientConfigBuilder {
    /// Endpoint root, e.g. `http://localhost:7474`
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn transaction_path(mut self, path: impl Into<String>) -> Self {
        self.transaction_path = path.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Configuration("base_url is required".into()))?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Configuration(format!(
                "base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }

        let path = self.transaction_path.trim().trim_end_matches('/');
        let transaction_path = if path.is_empty() || path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        Ok(ClientConfig {
            base_url,
            transaction_path,
            timeout: self.timeout,
            credentials: self.credentials,
        })
    }
}

// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for GraphTx
//!
//! Provides one-off transactional operations against an endpoint and an
//! interactive console (REPL) that keeps a single transaction open.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    connect, handle_begin, handle_commit, handle_escape, handle_query, handle_reset_timeout,
    handle_rollback, handle_shell,
};

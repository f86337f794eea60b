// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! GraphTx CLI entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level_filter())
        .parse_default_env()
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Escaping is local; no endpoint needed
    let client = match &cli.command {
        Commands::Escape { text } => return cli::handle_escape(text),
        _ => cli::connect(&cli)?,
    };
    log::debug!(
        "Using endpoint {}",
        client.endpoint().config().transaction_url()
    );

    match cli.command {
        Commands::Query {
            lines,
            transaction,
            statement,
        } => cli::handle_query(&client, lines, transaction, statement).await,
        Commands::Begin { lines, statement } => cli::handle_begin(&client, lines, statement).await,
        Commands::Commit {
            transaction,
            lines,
            statement,
        } => cli::handle_commit(&client, transaction, lines, statement).await,
        Commands::Rollback {
            transaction,
            format,
        } => cli::handle_rollback(&client, transaction, format).await,
        Commands::ResetTimeout {
            transaction,
            format,
        } => cli::handle_reset_timeout(&client, transaction, format).await,
        Commands::Shell => cli::handle_shell(&client).await,
        Commands::Escape { text } => cli::handle_escape(&text),
    }
}

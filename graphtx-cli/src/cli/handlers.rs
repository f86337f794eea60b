// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for GraphTx

use colored::Colorize;
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::Path;

use super::commands::{Cli, OutputFormat, StatementArgs};
use super::output::ResultFormatter;
use graphtx::{
    escape_identifier, Client, ClientConfig, Error, OperationResult, Request, TransactionHandle,
};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Build a client from the global options, prompting for a missing password
pub fn connect(cli: &Cli) -> Result<Client, Box<dyn std::error::Error>> {
    let mut builder = ClientConfig::builder().base_url(cli.url.clone());

    if let Some(user) = &cli.user {
        let password = match &cli.password {
            Some(password) => password.clone(),
            None => {
                print!("Password: ");
                std::io::Write::flush(&mut std::io::stdout())?;
                rpassword::read_password()?
            }
        };
        builder = builder.basic_auth(user.clone(), password);
    }

    Ok(Client::new(builder.build()?)?)
}

/// Print an outcome, or hand the failure back so the process exits non-zero
fn report(result: OperationResult, format: OutputFormat) -> HandlerResult {
    match result {
        Ok(outcome) => {
            println!("{}", ResultFormatter::format(&outcome, format));
            Ok(())
        }
        Err(failure) => {
            if format == OutputFormat::Json {
                println!("{}", ResultFormatter::format_failure(&failure, format));
            }
            Err(failure.into())
        }
    }
}

/// Handle the query command
pub async fn handle_query(
    client: &Client,
    lines: Vec<String>,
    transaction: Option<u64>,
    args: StatementArgs,
) -> HandlerResult {
    let mut request = args.to_request(&lines);
    if let Some(id) = transaction {
        request = request.transaction(id);
    }
    report(client.query(request).await, args.format)
}

/// Handle the begin command
pub async fn handle_begin(client: &Client, lines: Vec<String>, args: StatementArgs) -> HandlerResult {
    report(client.begin(args.to_request(&lines)).await, args.format)
}

/// Handle the commit command
pub async fn handle_commit(
    client: &Client,
    transaction: u64,
    lines: Vec<String>,
    args: StatementArgs,
) -> HandlerResult {
    let request = args.to_request(&lines).transaction(transaction);
    report(client.commit(request).await, args.format)
}

pub async fn handle_rollback(client: &Client, transaction: u64, format: OutputFormat) -> HandlerResult {
    report(client.rollback(transaction).await, format)
}

pub async fn handle_reset_timeout(
    client: &Client,
    transaction: u64,
    format: OutputFormat,
) -> HandlerResult {
    report(client.reset_timeout(transaction).await, format)
}

pub fn handle_escape(text: &str) -> HandlerResult {
    println!("{}", escape_identifier(text));
    Ok(())
}

/// Handle the shell (REPL) command
pub async fn handle_shell(client: &Client) -> HandlerResult {
    println!("{}", "GraphTx".bold().green());
    println!("Connected to {}", client.endpoint().config().transaction_url());
    println!("Type 'help' for commands, 'exit' or 'quit' to exit");
    println!("Multi-line statements supported - use ';' to terminate");

    let config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(config)?;

    let history_path = ".graphtx/.shell_history.txt";
    if let Some(parent) = Path::new(&history_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let _ = rl.load_history(&history_path);

    let mut shell = ShellSession::default();
    let mut statement_buffer = String::new();

    loop {
        let prompt = match (&shell.open, statement_buffer.is_empty()) {
            (Some(handle), true) => format!("{}> ", format!("tx:{}", handle.id).cyan()),
            (None, true) => format!("{}> ", "graphtx".cyan()),
            (_, false) => "...> ".to_string(),
        };

        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                if !statement_buffer.is_empty() {
                    statement_buffer.clear();
                    println!("{}", "\nStatement buffer cleared".yellow());
                }
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();

        if statement_buffer.is_empty() {
            match trimmed.to_lowercase().as_str() {
                "exit" | "quit" => {
                    println!("{}", "Goodbye!".green());
                    break;
                }
                "help" => {
                    print_help();
                    continue;
                }
                "" => continue,
                _ => {}
            }

            if let Some(command) = trimmed.strip_prefix(':') {
                rl.add_history_entry(trimmed)?;
                shell.run_command(client, command).await;
                continue;
            }
        }

        statement_buffer.push_str(&line);
        statement_buffer.push('\n');

        if trimmed.ends_with(';') {
            let text = statement_buffer.trim().to_string();
            rl.add_history_entry(&text)?;
            let statement = text.trim_end_matches(';').trim_end();
            if !statement.is_empty() {
                shell.run_statement(client, statement).await;
            }
            statement_buffer.clear();
        }
    }

    if let Some(handle) = &shell.open {
        println!(
            "{}",
            format!(
                "Transaction {} left open; it will expire on the server",
                handle.id
            )
            .yellow()
        );
    }

    let _ = rl.save_history(&history_path);

    Ok(())
}

/// The one transaction a shell keeps open, if any
#[derive(Debug, Default)]
struct ShellSession {
    open: Option<TransactionHandle>,
}

impl ShellSession {
    async fn run_statement(&mut self, client: &Client, statement: &str) {
        let request = match &self.open {
            Some(handle) => Request::from_query(statement).transaction(handle.id),
            None => Request::from_query(statement),
        };
        let result = client.query(request).await;
        self.track(&result, false);
        print_result(&result);
    }

    async fn run_command(&mut self, client: &Client, command: &str) {
        let (name, rest) = command
            .split_once(char::is_whitespace)
            .map(|(name, rest)| (name, rest.trim()))
            .unwrap_or((command, ""));

        match (name, self.open.as_ref().map(|handle| handle.id)) {
            ("begin", Some(id)) => {
                println!("{}", format!("Transaction {} is already open", id).yellow());
            }
            ("begin", None) => {
                let request = if rest.is_empty() {
                    Request::new()
                } else {
                    Request::from_query(rest.trim_end_matches(';'))
                };
                let result = client.begin(request).await;
                if let Ok(outcome) = &result {
                    self.open = outcome.transaction();
                }
                print_result(&result);
            }
            ("commit" | "rollback" | "reset", None) => {
                println!("{}", "No open transaction; use :begin".yellow());
            }
            ("commit", Some(id)) => {
                let request = if rest.is_empty() {
                    Request::new()
                } else {
                    Request::from_query(rest.trim_end_matches(';'))
                };
                let result = client.commit(request.transaction(id)).await;
                self.track(&result, true);
                print_result(&result);
            }
            ("rollback", Some(id)) => {
                let result = client.rollback(id).await;
                self.track(&result, true);
                print_result(&result);
            }
            ("reset", Some(id)) => {
                let result = client.reset_timeout(id).await;
                self.track(&result, false);
                print_result(&result);
            }
            ("escape", _) => println!("{}", escape_identifier(rest)),
            _ => println!(
                "{}",
                format!("Unknown command ':{}'; type 'help'", name).yellow()
            ),
        }
    }

    /// Follow the open transaction through an operation's outcome.
    ///
    /// The endpoint rolls a transaction back when a statement in it fails,
    /// so a remote error closes it here too.
    fn track(&mut self, result: &OperationResult, closes: bool) {
        let Some(id) = self.open.as_ref().map(|handle| handle.id) else {
            return;
        };
        match result {
            Ok(_) if closes => self.open = None,
            Ok(outcome) => {
                if let (Some(handle), Some(expires)) = (self.open.as_mut(), &outcome.info.expires) {
                    handle.expires = Some(expires.clone());
                }
            }
            Err(failure) if matches!(failure.error, Error::Remote { .. }) => {
                println!(
                    "{}",
                    format!("Transaction {} was rolled back by the server", id).yellow()
                );
                self.open = None;
            }
            Err(_) => {}
        }
    }
}

fn print_result(result: &OperationResult) {
    match result {
        Ok(outcome) => println!("{}", ResultFormatter::format(outcome, OutputFormat::Table)),
        Err(failure) => eprintln!(
            "{}",
            ResultFormatter::format_failure(failure, OutputFormat::Table).red()
        ),
    }
}

/// Print help message
fn print_help() {
    println!("{}", "Available commands:".bold().green());
    println!("  {}  - Show this help message", "help".cyan());
    println!("  {}  - Exit the console", "exit/quit".cyan());
    println!("\n{}", "Transactions:".bold().green());
    println!(
        "  {}  - Open a transaction, optionally running a statement",
        ":begin [statement]".cyan()
    );
    println!(
        "  {}  - Commit, optionally running a final statement",
        ":commit [statement]".cyan()
    );
    println!("  {}  - Roll back the open transaction", ":rollback".cyan());
    println!("  {}  - Keep the open transaction alive", ":reset".cyan());
    println!("  {}  - Escape an identifier", ":escape <text>".cyan());
    println!("\n{}", "Statement syntax:".bold().green());
    println!("  Multi-line statements are supported");
    println!("  Terminate statements with semicolon (;)");
    println!("  Statements run in the open transaction, otherwise auto-commit");
    println!("\n{}", "Examples:".bold().green());
    println!("  {}", "MATCH (n) RETURN n LIMIT 10;".yellow());
    println!("  {}", "CREATE (p:Person {name: 'Alice'});".yellow());
}

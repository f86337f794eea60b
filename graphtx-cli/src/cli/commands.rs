// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for GraphTx

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphtx::{Parameters, Request, Substitutions};
use serde_json::Value as JsonValue;

/// Log level options
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only errors
    Error,
    /// Warnings and errors
    Warn,
    /// Info, warnings, and errors
    Info,
    /// Debug messages and above (verbose)
    Debug,
    /// All messages including trace (very verbose)
    Trace,
    /// Disable all logging
    Off,
}

impl LogLevel {
    /// Convert to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// GraphTx CLI - run statements against a transactional graph endpoint
#[derive(Parser)]
#[command(name = "graphtx")]
#[command(about = "GraphTx - statements and transactions over the graph HTTP API")]
#[command(version)]
pub struct Cli {
    /// Endpoint base URL
    #[arg(
        long,
        env = "GRAPHTX_URL",
        default_value = "http://localhost:7474",
        global = true
    )]
    pub url: String,

    /// Username for basic authentication
    #[arg(short = 'u', long = "user", env = "GRAPHTX_USER", global = true)]
    pub user: Option<String>,

    /// Password for basic authentication (prompted when a user is given without one)
    #[arg(
        short = 'p',
        long = "password",
        env = "GRAPHTX_PASSWORD",
        hide_env_values = true,
        global = true
    )]
    pub password: Option<String>,

    /// Set log level (error, warn, info, debug, trace, off)
    #[arg(short = 'l', long = "log-level", global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Verbose mode (equivalent to --log-level debug)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log filter; an explicit level wins over `--verbose`
    pub fn level_filter(&self) -> log::LevelFilter {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level.to_level_filter(),
            (None, true) => log::LevelFilter::Debug,
            (None, false) => log::LevelFilter::Warn,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Run statements, auto-committed unless --txn names an open transaction
    Query {
        /// Query lines, joined with newlines
        #[arg(required = true)]
        lines: Vec<String>,

        /// Open transaction to run in
        #[arg(long = "txn")]
        transaction: Option<u64>,

        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Open a transaction, optionally running statements in it
    Begin {
        /// Query lines, joined with newlines
        lines: Vec<String>,

        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Run any final statements and commit a transaction
    Commit {
        /// Transaction id
        transaction: u64,

        /// Query lines, joined with newlines
        lines: Vec<String>,

        #[command(flatten)]
        statement: StatementArgs,
    },

    /// Roll back a transaction
    Rollback {
        /// Transaction id
        transaction: u64,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Keep a transaction alive
    ResetTimeout {
        /// Transaction id
        transaction: u64,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Escape a label or property name for use in a query
    Escape {
        /// Raw identifier
        text: String,
    },

    /// Interactive console (REPL)
    Shell,
}

/// Parameters, substitutions and output format shared by statement commands
#[derive(Args, Debug, Default)]
pub struct StatementArgs {
    /// Query parameter as name=value (value parsed as JSON, else text)
    #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Template substitution for ${name} as name=value
    #[arg(long = "sub", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub subs: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

impl StatementArgs {
    pub fn parameters(&self) -> Parameters {
        self.params
            .iter()
            .map(|(name, value)| (name.clone(), parse_value(value)))
            .collect()
    }

    pub fn substitutions(&self) -> Substitutions {
        self.subs.iter().cloned().collect()
    }

    /// Build a request from query lines; no lines means no statement
    pub fn to_request(&self, lines: &[String]) -> Request {
        let request = Request::new()
            .parameters(self.parameters())
            .substitutions(self.substitutions());
        if lines.is_empty() {
            request
        } else {
            request.lines(lines.iter().cloned())
        }
    }
}

/// `name=value`; the value may itself contain `=`
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

/// JSON when it parses, otherwise the raw text as a string
pub fn parse_value(raw: &str) -> JsonValue {
    serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()))
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("name=a=b").unwrap(),
            ("name".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_value("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_parse_value_prefers_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[1,2]"), json!([1, 2]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("Alice"), json!("Alice"));
    }

    #[test]
    fn test_query_command_parses() {
        let cli = Cli::try_parse_from([
            "graphtx",
            "--url",
            "http://db:7474",
            "query",
            "MATCH (n:${label})",
            "RETURN n",
            "--txn",
            "4",
            "--param",
            "limit=10",
            "--sub",
            "label=Person",
            "-f",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.url, "http://db:7474");
        match cli.command {
            Commands::Query {
                lines,
                transaction,
                statement,
            } => {
                assert_eq!(lines, vec!["MATCH (n:${label})", "RETURN n"]);
                assert_eq!(transaction, Some(4));
                assert_eq!(statement.format, OutputFormat::Json);
                assert_eq!(statement.parameters().get("limit"), Some(&json!(10)));
                assert_eq!(
                    statement.substitutions().get("label").map(String::as_str),
                    Some("Person")
                );
            }
            _ => panic!("expected query command"),
        }
    }

    #[test]
    fn test_commit_takes_transaction_then_lines() {
        let cli = Cli::try_parse_from(["graphtx", "commit", "7", "CREATE (:C)"]).unwrap();
        match cli.command {
            Commands::Commit {
                transaction, lines, ..
            } => {
                assert_eq!(transaction, 7);
                assert_eq!(lines, vec!["CREATE (:C)"]);
            }
            _ => panic!("expected commit command"),
        }
    }

    #[test]
    fn test_request_without_lines_has_no_statement() {
        let args = StatementArgs::default();
        let descriptor = args.to_request(&[]).into_descriptor();
        assert!(descriptor.statements.is_empty());
        assert_eq!(descriptor.query, None);
    }

    #[test]
    fn test_level_filter() {
        let cli = Cli::try_parse_from(["graphtx", "-v", "shell"]).unwrap();
        assert_eq!(cli.level_filter(), log::LevelFilter::Debug);

        let cli = Cli::try_parse_from(["graphtx", "-v", "-l", "error", "shell"]).unwrap();
        assert_eq!(cli.level_filter(), log::LevelFilter::Error);
    }
}

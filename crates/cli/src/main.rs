//! Command-line access to the Credify platform.
//!
//! Run with: `credify <command> [args]`
//!
//! Configuration comes from `CREDIFY_*` environment variables or a
//! `credify.toml` / `credify.json` file. Results are printed to stdout as
//! JSON; logs go to stderr.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use credify_common::auth::TokenManager;
use credify_domain::ClientConfig;
use credify_infra::config;
use credify_infra::observability::init_tracing;
use credify_infra::ApiClient;
use serde::Serialize;
use tracing::{debug, info};

/// Characters of the access token shown by `credify token`
const TOKEN_PREVIEW_CHARS: usize = 8;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("warn");

    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str);
    debug!(command = command.unwrap_or("help"), args = args.len(), "dispatching command");

    let result = match command {
        Some("token") => run_token().await,
        Some("connections") => run_connections().await,
        Some("connection") => run_connection(args.get(1)).await,
        Some("proof") => run_proof(args.get(1)).await,
        Some("help" | "--help" | "-h") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown command: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow!("Unknown command"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("Credify platform client");
    println!();
    println!("USAGE:");
    println!("    credify <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    token             Obtain an access token and show its expiry");
    println!("    connections       List connections of the organization");
    println!("    connection <id>   Show one connection");
    println!("    proof <id>        Show one proof request");
    println!("    help              Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    CREDIFY_ORGANIZATION_ID, CREDIFY_TOKEN_URL, CREDIFY_CLIENT_ID,");
    println!("    CREDIFY_CLIENT_SECRET, CREDIFY_BASE_URL, CREDIFY_TIMEOUT_MS");
    println!("    RUST_LOG, CREDIFY_LOG_FORMAT=json");
}

fn load_config() -> anyhow::Result<ClientConfig> {
    config::load().context("failed to load configuration")
}

fn client() -> anyhow::Result<ApiClient> {
    ApiClient::new(load_config()?).context("failed to create client")
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn required_id(id: Option<&String>, usage: &str) -> anyhow::Result<String> {
    id.cloned().ok_or_else(|| anyhow!("missing id\n\nUSAGE:\n    credify {usage}"))
}

/// Fetch a token with the configured credentials; only a prefix is printed
async fn run_token() -> anyhow::Result<()> {
    let config = load_config()?;
    let manager = TokenManager::from_config(config.auth.clone(), config.timeout())
        .context("failed to create token client")?;

    let token = manager.get_access_token().await.context("token request failed")?;
    info!(token_url = %config.auth.token_url, "access token obtained");
    let preview: String = token.chars().take(TOKEN_PREVIEW_CHARS).collect();

    print_json(&serde_json::json!({
        "token_url": config.auth.token_url,
        "token_preview": format!("{preview}..."),
        "expires_in_ms": manager.millis_until_expiry(),
    }))
}

async fn run_connections() -> anyhow::Result<()> {
    let client = client()?;
    let connections = client.connections().list().await?;
    info!(count = connections.len(), "connections listed");
    print_json(&connections)
}

async fn run_connection(id: Option<&String>) -> anyhow::Result<()> {
    let id = required_id(id, "connection <id>")?;
    let client = client()?;
    let connection = client.connections().get(&id).await?;
    print_json(&connection)
}

async fn run_proof(id: Option<&String>) -> anyhow::Result<()> {
    let id = required_id(id, "proof <id>")?;
    let client = client()?;
    let proof = client.proofs().get(&id).await?;
    print_json(&proof)
}

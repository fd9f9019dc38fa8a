// Dating Wingman - MCP tool server
// Main entry point

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::{Map, Value};
use std::path::PathBuf;

use tracing_subscriber::prelude::*;
use wingman::config::{load_config, Config};
use wingman::server::{protocol, WingmanServer};
use wingman::tools::{build_registry, InvocationRequest, InvocationResult};

#[derive(Parser, Debug)]
#[command(name = "wingman")]
#[command(about = "Dating assistant tools over MCP", version)]
struct Args {
    /// Run mode (defaults to serve)
    #[command(subcommand)]
    command: Option<Command>,

    /// Path to a TOML config file (default: ~/.wingman/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Bind address, overrides HOST and PORT (e.g. 127.0.0.1:8000)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Print the tool catalog as JSON
    Tools,
    /// Invoke one tool locally, bypassing HTTP and auth
    Call {
        /// Tool name
        tool: String,
        /// Arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    match args.command {
        None => run_server(args.config, None).await,
        Some(Command::Serve { bind }) => run_server(args.config, bind).await,
        Some(Command::Tools) => print_catalog(),
        Some(Command::Call { tool, args: raw }) => run_call(args.config, &tool, &raw).await,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stdout stays clean for `tools` and `call` output
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing_log::LogTracer::init().ok();
}

fn load(config_path: Option<PathBuf>) -> Result<Config> {
    load_config(config_path.as_deref()).context("Failed to load configuration")
}

/// Run HTTP server
async fn run_server(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let mut config = load(config_path)?;

    if let Some(bind) = bind {
        let (host, port) = bind
            .rsplit_once(':')
            .with_context(|| format!("Bind address must be host:port, got {}", bind))?;
        config.server.host = host.to_string();
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid port in bind address: {}", bind))?;
    }

    if config.backend.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set; backend tools will report a configuration error");
    }

    let server = WingmanServer::from_config(&config)?;
    server.serve().await
}

fn print_catalog() -> Result<()> {
    // The validate identity does not affect the catalog shape.
    let registry = build_registry("")?;
    let listing = protocol::tools_list_result(registry.list_tools());
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

async fn run_call(config_path: Option<PathBuf>, tool: &str, raw: &str) -> Result<()> {
    let arguments: Map<String, Value> =
        serde_json::from_str(raw).context("--args must be a JSON object")?;

    let config = load(config_path)?;
    let server = WingmanServer::from_config(&config)?;

    match server
        .dispatcher()
        .dispatch(InvocationRequest::new(tool, arguments))
        .await
    {
        InvocationResult::Success(text) => {
            println!("{}", text);
            Ok(())
        }
        InvocationResult::Failure(failure) => {
            eprintln!("{}", failure.message);
            bail!("{} failed: {:?}", tool, failure.kind)
        }
    }
}

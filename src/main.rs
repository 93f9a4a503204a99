use std::io;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod convert;
mod dispatch;
mod extract;
mod http;
mod mcp;
mod stdio;
mod tools;

use config::{ServerConfig, TransportMode};
use convert::AutoConverter;
use dispatch::Dispatcher;
use extract::Extractor;

#[derive(Parser)]
#[command(name = "mcp-file-extract")]
#[command(version, about = "MCP server that extracts documents to HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the MCP server
    Serve {
        /// Serve MCP over stdio (NDJSON)
        #[arg(long, conflicts_with = "streamable_http")]
        stdio: bool,
        /// Serve MCP over streamable HTTP (message endpoint at /message)
        #[arg(long)]
        streamable_http: bool,
        /// Directory files are served from
        #[arg(long, default_value = config::DEFAULT_BASE_DIR)]
        dir: String,
        /// HTTP listen port
        #[arg(long, default_value_t = config::DEFAULT_PORT)]
        port: u16,
    },
    /// Extract one file and print the result body
    Extract(ExtractArgs),
}

#[derive(Args, Clone)]
struct ExtractArgs {
    /// Name of the file inside the extraction directory
    filename: String,
    /// Directory files are served from
    #[arg(long, default_value = config::DEFAULT_BASE_DIR)]
    dir: String,
    /// Pretty-print the JSON body
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            stdio,
            streamable_http,
            dir,
            port,
        } => {
            let mode = if stdio {
                TransportMode::Stdio
            } else if streamable_http {
                TransportMode::StreamableHttp
            } else {
                TransportMode::Http
            };
            let config = ServerConfig::new(dir, mode, port);
            config.ensure_base_dir();
            let dispatcher = Dispatcher::new(Extractor::new(config.clone(), Arc::new(AutoConverter)));

            match mode {
                TransportMode::Stdio => stdio::serve(&dispatcher),
                TransportMode::Http | TransportMode::StreamableHttp => {
                    let runtime = tokio::runtime::Runtime::new()
                        .context("failed to start async runtime")?;
                    runtime.block_on(http::serve(Arc::new(dispatcher), &config))
                }
            }
        }
        Commands::Extract(args) => run_extract(args),
    }
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    let config = ServerConfig::new(&args.dir, TransportMode::Stdio, 0);
    let extractor = Extractor::new(config, Arc::new(AutoConverter));
    let result = extractor.extract(&args.filename);

    let body = result.body();
    if args.json {
        let value: serde_json::Value =
            serde_json::from_str(&body).context("result body is not valid JSON")?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{body}");
    }

    if result.is_error() {
        process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

//! The grid-query command line.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use grid_query_cli::{run, Command, Context};
use grid_query_configuration::environment::ProcessEnvironment;

/// Translate grid queries into parameterized SQL.
#[derive(Debug, Parser)]
#[command(version)]
struct CliArgs {
    /// The configuration directory.
    #[arg(long = "context", env = "GRID_QUERY_CONTEXT", default_value = ".")]
    context_path: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let context = Context {
        context_path: args.context_path,
        environment: ProcessEnvironment,
    };

    let output = run(args.command, context).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use solace::connector::api::{Container, ContainerConfig, Router};
use solace::connector::http;
use solace::Commands;

#[derive(Parser)]
#[command(name = "solace")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Region the functions are pinned to
    #[arg(long, global = true, default_value = "us-central1")]
    region: String,

    /// Answer from canned responses instead of calling the completion API
    #[arg(long, global = true)]
    mock_llm: bool,

    /// Caller identity for plan and check-in commands
    #[arg(long, global = true, default_value = "cli")]
    caller: String,

    /// uid:token pairs accepted by the HTTP server (defaults to SOLACE_CALLER_TOKENS)
    #[arg(long, global = true)]
    caller_tokens: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Container::new(ContainerConfig {
        region: cli.region,
        mock_llm: cli.mock_llm,
        cli_caller: Some(cli.caller),
        caller_tokens: cli.caller_tokens,
    })?;

    // The HTTP server owns the container for its whole lifetime, so it is
    // dispatched here rather than through the router.
    if let Commands::Serve { port, public } = cli.command {
        let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
        let addr = SocketAddr::from((host, port));
        info!("Starting callable server in region {}", container.region());
        return http::serve(Arc::new(container), addr).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

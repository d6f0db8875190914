//! slnx-mermaid - solution dependency graphs as Mermaid diagrams

mod diagram_cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slnx-mermaid")]
#[command(about = "Render .sln/.slnx project dependencies as a Mermaid diagram", version)]
struct Cli {
    #[command(subcommand)]
    command: diagram_cli::DiagramCommands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = diagram_cli::run(cli.command).await {
        diagram_cli::report(&err);
        std::process::exit(1);
    }

    Ok(())
}

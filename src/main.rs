mod cli;
mod logging;

use std::fs;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use roster_engine::api::{AppState, RosterRequest, compute_roster, create_router};
use roster_engine::config::ConfigLoader;

use crate::cli::{Cli, Command, ComputeArgs, ServeArgs};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Serve(args) => serve(args),
        Command::Compute(args) => compute(args),
    }
}

fn load_config(path: &Path) -> Result<ConfigLoader> {
    ConfigLoader::load(path)
        .with_context(|| format!("loading facility configuration from {}", path.display()))
}

fn serve(args: ServeArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let router = create_router(AppState::new(config));

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(args.bind)
            .await
            .with_context(|| format!("binding {}", args.bind))?;
        info!(bind = %args.bind, "Serving roster API");
        axum::serve(listener, router).await.context("serving HTTP")
    })
}

fn compute(args: ComputeArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let request: RosterRequest = serde_json::from_str(&raw)
        .with_context(|| format!("parsing roster request {}", args.input.display()))?;

    let roster = compute_roster(request, &config)?;
    let json = serde_json::to_string_pretty(&roster).context("serializing roster")?;

    match args.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{json}"),
    }
    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Rotating-shift roster engine.
#[derive(Parser)]
#[command(
    name = "roster-engine",
    version,
    about = "Monthly duty rosters and coverage audits for rotating-shift staff"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Serve the HTTP API.
    Serve(ServeArgs),
    /// Compute one month from a request file and print the result.
    Compute(ComputeArgs),
}

/// Arguments for the `serve` subcommand.
#[derive(clap::Args)]
pub struct ServeArgs {
    /// Path to the facility configuration directory.
    #[arg(short, long, default_value = "config/facility")]
    pub config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,
}

/// Arguments for the `compute` subcommand.
#[derive(clap::Args)]
pub struct ComputeArgs {
    /// Path to the facility configuration directory.
    #[arg(short, long, default_value = "config/facility")]
    pub config: PathBuf,

    /// Path to a roster request JSON file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

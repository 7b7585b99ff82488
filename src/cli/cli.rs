use crate::cli::commands::{GetCommand, InfoCommand, ShowCommand};
use crate::config::STORE_PATH_ENV;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "device-identity",
    about = "Inspect or create the persistent device identifier",
    long_about = None
)]
pub struct Cli {
    /// Path of the key-value store file (defaults to the local data dir)
    #[arg(long, global = true, env = STORE_PATH_ENV)]
    pub store: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Get(GetCommand),
    Show(ShowCommand),
    Info(InfoCommand),
}

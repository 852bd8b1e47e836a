// crates/vtisnap-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod util;

#[derive(Parser)]
#[command(name = "vtisnap-cli")]
#[command(about = "Field snapshot exporter (VTK ImageData)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write every #snapshot: in an input file from synthetic uniform fields
    Export(cmd::export::ExportArgs),

    /// Print a normalised #snapshot: command line
    Command(cmd::command::CommandArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Export(args) => cmd::export::run(args),
        Commands::Command(args) => cmd::command::run(args),
    }
}

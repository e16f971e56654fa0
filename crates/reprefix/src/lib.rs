//! reprefix CLI: argument surface and command dispatch.

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod fsops;

/// Parse arguments and run the selected command.
pub fn run() -> anyhow::Result<()> {
    match cli::Cli::parse().command {
        cli::Command::Rewrite(args) => commands::rewrite::run(args),
        cli::Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

mod cli;
mod commands;
mod config;
mod formatters;
mod tables;
mod terminal_progress_reporter;

use std::process;

use clap::Parser;
use rcforge::{
    config::loader::{ApplyToConfig, ConfigLoader, Yaml},
    fs::RealFileSystem,
};
use terminal_progress_reporter::TerminalProgressReporter;
use tracing::{Level, debug};

use crate::{cli::ClapCli, commands::dispatch_command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = ClapCli::parse();

    let fs = RealFileSystem;

    // Use `config` for most things; use `original_config` for `config` commands, where we want to
    // deal strictly with the config file.
    let (config, original_config) = {
        // 1. Load config.yaml
        let config = Yaml::new(&fs).load_config()?;

        // 2. Apply CLI args to config (overriding)
        (args.apply_to_config(config.clone()), config)
    };

    // stdout is reserved for `rc load` output and utilities
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(config.use_colors())
        .with_max_level(if config.verbose() {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    debug!("CLI arguments: {:#?}", &args);
    debug!("Final config: {:#?}", &config);

    let reporter = TerminalProgressReporter::new(config.use_colors());

    // 3. Dispatch and execute the requested command
    let exit_code = dispatch_command(&args, &config, original_config, reporter).await;

    process::exit(exit_code)
}

pub(crate) mod check;
pub(crate) mod checksum;
pub(crate) mod config;
pub(crate) mod list;
pub(crate) mod load;
pub(crate) mod run;
pub(crate) mod scripts;

use rcforge::{config::AppConfig, fragment::DiscoveryError};
use tracing::debug;

use crate::{
    cli::{ClapCli, ClapCommands, ConfigSubcommands},
    terminal_progress_reporter::TerminalProgressReporter,
};

/// A subcommand that runs to completion and yields a process exit code
pub(crate) trait HandleCommand {
    fn handle_command(&self) -> i32;
}

/// Primary command dispatcher that routes to the appropriate command handler
pub(crate) async fn dispatch_command(
    args: &ClapCli,
    config: &AppConfig,
    original_config: AppConfig,
    reporter: TerminalProgressReporter,
) -> i32 {
    debug!("Dispatching command: {:?}", args.command);

    match &args.command {
        ClapCommands::Load(context) => {
            load::LoadCommand::new(config, context, reporter).handle_command()
        }
        ClapCommands::Scripts(context) => {
            scripts::ScriptsCommand::new(config, context, reporter).handle_command()
        }
        ClapCommands::Check(check_args) => {
            check::CheckCommand::new(config, check_args, reporter).handle_command()
        }
        ClapCommands::Run(run_args) => {
            run::handle_run(
                config,
                &run_args.name,
                &run_args.args,
                run_args.system || args.system,
                reporter,
            )
            .await
        }
        ClapCommands::External(words) => match words.split_first() {
            Some((name, rest)) => run::handle_run(config, name, rest, args.system, reporter).await,
            None => {
                reporter.report_error("No utility name given");
                2
            }
        },
        ClapCommands::List => list::ListCommand::new(config, reporter).handle_command(),
        ClapCommands::Checksum(checksum_args) => {
            checksum::ChecksumCommand::new(config, checksum_args, reporter).handle_command()
        }
        ClapCommands::Config(config_cmd) => match config_cmd.command {
            ConfigSubcommands::Validate => {
                config::ValidateCommand::new(&original_config, reporter).handle_command()
            }
        },
    }
}

/// Report a scripts directory that could not be scanned
pub(crate) fn report_discovery_error(error: &DiscoveryError, reporter: TerminalProgressReporter) {
    reporter.report_error(error);

    if let DiscoveryError::DirectoryNotFound(_) = error {
        reporter.report_suggestion(
            "Create the directory, or set `scripts_directory` in your config file",
        );
    }
}

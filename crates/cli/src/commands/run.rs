use rcforge::{
    commands::{DispatchError, DispatchOutcome, ProcessRunner, dispatch},
    config::AppConfig,
    fs::RealFileSystem,
};

use crate::terminal_progress_reporter::TerminalProgressReporter;

/// Shell convention for a command that was found but could not be executed
const EXIT_CANNOT_EXECUTE: i32 = 126;

pub(crate) async fn handle_run(
    config: &AppConfig,
    name: &str,
    args: &[String],
    force_system: bool,
    reporter: TerminalProgressReporter,
) -> i32 {
    let outcome = dispatch(
        &RealFileSystem,
        &ProcessRunner,
        config.user_utility_directory(),
        config.system_utility_directory(),
        name,
        args,
        force_system,
    )
    .await;

    match outcome {
        Ok(outcome) => {
            match &outcome {
                DispatchOutcome::Ran { .. } => {}
                DispatchOutcome::NotFound { .. } => {
                    reporter.report_error(format!("rc: command not found: {name}"));
                    reporter.report_suggestion("Run `rc list` to see available utilities");
                }
                DispatchOutcome::Conflict { paths, tier, .. } => {
                    reporter.report_error(format!(
                        "rc: '{name}' is ambiguous: {} {tier} utilities share that name",
                        paths.len()
                    ));
                    for path in paths {
                        eprintln!("{}", TerminalProgressReporter::format(4, path.display()));
                    }
                    reporter.report_suggestion("Rename or remove all but one of them");
                }
            }

            outcome.exit_code()
        }
        Err(e @ DispatchError::Run(_)) => {
            reporter.report_error(e);
            EXIT_CANNOT_EXECUTE
        }
        Err(e @ DispatchError::Index(_)) => {
            reporter.report_error(e);
            1
        }
    }
}

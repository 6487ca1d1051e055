use rcforge::{
    config::AppConfig,
    fragment::{discover, find_conflicts},
    fs::RealFileSystem,
};
use tracing::info;

use crate::{
    cli::ContextArgs, formatters::shell_quote,
    terminal_progress_reporter::TerminalProgressReporter,
};

use super::{HandleCommand, report_discovery_error};

/// Emits `source` lines for the shell to evaluate
///
/// Conflicting fragments are all sourced, in file name order; the conflict
/// is only reported on stderr.
pub(crate) struct LoadCommand<'a> {
    config: &'a AppConfig,
    context: &'a ContextArgs,
    reporter: TerminalProgressReporter,
}

impl<'a> LoadCommand<'a> {
    pub(crate) fn new(
        config: &'a AppConfig,
        context: &'a ContextArgs,
        reporter: TerminalProgressReporter,
    ) -> Self {
        Self {
            config,
            context,
            reporter,
        }
    }
}

impl HandleCommand for LoadCommand<'_> {
    fn handle_command(&self) -> i32 {
        let ctx = self
            .config
            .execution_context(self.context.hostname.as_deref(), self.context.shell);
        info!("Loading fragments for {ctx}");

        let set = match discover(&RealFileSystem, self.config.scripts_directory(), &ctx) {
            Ok(set) => set,
            Err(e) => {
                report_discovery_error(&e, self.reporter);
                return 1;
            }
        };

        for conflict in find_conflicts(&set) {
            let names: Vec<String> = conflict
                .contenders()
                .iter()
                .map(ToString::to_string)
                .collect();

            self.reporter.report_warning(format!(
                "Sequence {:03} is shared in {ctx}: {} (run `rc check --fix`)",
                conflict.sequence(),
                names.join(", ")
            ));
        }

        for path in set.paths() {
            println!("source {}", shell_quote(path.display()));
        }

        0
    }
}

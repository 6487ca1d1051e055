use rcforge::{config::AppConfig, fs::RealFileSystem};
use tracing::info;

use crate::{tables::ValidationTableReporter, terminal_progress_reporter::TerminalProgressReporter};

use super::HandleCommand;

/// Validates the configuration as loaded from disk, before CLI overrides
pub(crate) struct ValidateCommand<'a> {
    original_config: &'a AppConfig,
    reporter: TerminalProgressReporter,
}

impl<'a> ValidateCommand<'a> {
    pub(crate) fn new(original_config: &'a AppConfig, reporter: TerminalProgressReporter) -> Self {
        Self {
            original_config,
            reporter,
        }
    }
}

impl HandleCommand for ValidateCommand<'_> {
    fn handle_command(&self) -> i32 {
        info!("Validating configuration");

        let result = self.original_config.validate(&RealFileSystem);
        let issues = result.issues();

        if issues.is_empty() {
            self.reporter.report_success("Configuration is valid.");
            return 0;
        }

        if result.has_errors() {
            self.reporter.report_error("Validation failed.");
        }

        ValidationTableReporter::new()
            .add_issues(issues.errors().chain(issues.warnings()), self.reporter)
            .print();

        i32::from(result.has_errors())
    }
}

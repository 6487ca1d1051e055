use rcforge::{
    config::AppConfig,
    fs::RealFileSystem,
    utility::{Tier, UtilityIndex, read_summary},
};

use crate::{
    formatters::{format_dim, format_key},
    tables::ListTableReporter,
    terminal_progress_reporter::TerminalProgressReporter,
};

use super::HandleCommand;

pub(crate) struct ListCommand<'a> {
    config: &'a AppConfig,
    reporter: TerminalProgressReporter,
}

impl<'a> ListCommand<'a> {
    pub(crate) fn new(config: &'a AppConfig, reporter: TerminalProgressReporter) -> Self {
        Self { config, reporter }
    }
}

impl HandleCommand for ListCommand<'_> {
    fn handle_command(&self) -> i32 {
        let index = match UtilityIndex::build(
            &RealFileSystem,
            self.config.user_utility_directory(),
            self.config.system_utility_directory(),
        ) {
            Ok(index) => index,
            Err(e) => {
                self.reporter.report_error(e);
                return 1;
            }
        };

        let commands = index.commands();
        if commands.is_empty() {
            self.reporter.report_info("No utilities found.");
            self.reporter.report_suggestion(format!(
                "Add executables to {}",
                self.config.user_utility_directory().display()
            ));
            return 0;
        }

        let use_colors = self.config.use_colors();
        let mut table = ListTableReporter::new(vec!["Name", "Tier", "Status", "Summary", "Path"]);

        for (name, command) in commands {
            let status = if index.conflicts(command.tier()).contains_key(name) {
                self.reporter.format_warning("conflict")
            } else if command.tier() == Tier::User && index.overrides().contains_key(name) {
                "override".to_string()
            } else {
                "unique".to_string()
            };

            table.add_row(vec![
                format_key(name, use_colors),
                command.tier().to_string(),
                status,
                read_summary(&RealFileSystem, command.path()).unwrap_or_default(),
                format_dim(command.path().display(), use_colors),
            ]);
        }

        table.print();

        0
    }
}

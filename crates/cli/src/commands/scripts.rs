use std::collections::BTreeSet;

use rcforge::{
    config::AppConfig,
    fragment::{discover, find_conflicts},
    fs::RealFileSystem,
};

use crate::{
    cli::ContextArgs,
    formatters::{format_dim, format_key},
    tables::ListTableReporter,
    terminal_progress_reporter::TerminalProgressReporter,
};

use super::{HandleCommand, report_discovery_error};

pub(crate) struct ScriptsCommand<'a> {
    config: &'a AppConfig,
    context: &'a ContextArgs,
    reporter: TerminalProgressReporter,
}

impl<'a> ScriptsCommand<'a> {
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

impl HandleCommand for ScriptsCommand<'_> {
    fn handle_command(&self) -> i32 {
        let ctx = self
            .config
            .execution_context(self.context.hostname.as_deref(), self.context.shell);
        let scripts_dir = self.config.scripts_directory();

        let set = match discover(&RealFileSystem, scripts_dir, &ctx) {
            Ok(set) => set,
            Err(e) => {
                report_discovery_error(&e, self.reporter);
                return 1;
            }
        };

        if set.is_empty() {
            self.reporter.report_info(format!(
                "No fragments apply to {ctx} in {}",
                scripts_dir.display()
            ));
            return 0;
        }

        let conflicting: BTreeSet<u16> = find_conflicts(&set)
            .iter()
            .map(|conflict| conflict.sequence())
            .collect();

        let use_colors = self.reporter.use_colors();
        self.reporter.report_info(format!(
            "Fragments for {} in load order",
            format_key(&ctx, use_colors)
        ));

        let mut table = ListTableReporter::new(vec![
            "Seq",
            "Scope",
            "Shell",
            "Description",
            "Status",
            "File",
        ]);

        for fragment in &set {
            let status = if conflicting.contains(&fragment.sequence()) {
                self.reporter.format_warning("conflict")
            } else {
                "ok".to_string()
            };

            table.add_row(vec![
                format!("{:03}", fragment.sequence()),
                fragment.scope().to_string(),
                fragment.shell_tag().to_string(),
                fragment.description().to_string(),
                status,
                format_dim(fragment.path().display(), use_colors),
            ]);
        }

        table.print();

        0
    }
}

use std::collections::BTreeSet;

use console::Term;
use dialoguer::Select;
use rcforge::{
    config::AppConfig,
    context::ExecutionContext,
    fragment::{
        ConflictRecord, ContextConflicts, DiscoveryError, FragmentName, KeepChoice, audit,
        audit_all_contexts, renumber,
    },
    fs::RealFileSystem,
};
use tracing::{debug, info};

use crate::{
    cli::CheckArgs, formatters::format_key, terminal_progress_reporter::TerminalProgressReporter,
};

use super::{HandleCommand, report_discovery_error};

pub(crate) struct CheckCommand<'a> {
    config: &'a AppConfig,
    args: &'a CheckArgs,
    reporter: TerminalProgressReporter,
}

impl<'a> CheckCommand<'a> {
    pub(crate) fn new(
        config: &'a AppConfig,
        args: &'a CheckArgs,
        reporter: TerminalProgressReporter,
    ) -> Self {
        Self {
            config,
            args,
            reporter,
        }
    }

    fn audits(&self) -> Result<Vec<ContextConflicts>, DiscoveryError> {
        let scripts_dir = self.config.scripts_directory();

        if self.args.all {
            audit_all_contexts(&RealFileSystem, scripts_dir)
        } else {
            let ctx = self.config.execution_context(
                self.args.context.hostname.as_deref(),
                self.args.context.shell,
            );
            Ok(vec![audit(&RealFileSystem, scripts_dir, &ctx)?])
        }
    }

    fn print_conflict(&self, ctx: &ExecutionContext, conflict: &ConflictRecord) {
        self.reporter.report_warning(format!(
            "{}: sequence {:03} is used by {} fragments",
            format_key(ctx, self.reporter.use_colors()),
            conflict.sequence(),
            conflict.contenders().len()
        ));

        for fragment in conflict.contenders() {
            eprintln!("{}", TerminalProgressReporter::format(4, fragment));
        }
    }

    fn choose_keep(&self, conflict: &ConflictRecord) -> Option<FragmentName> {
        if self.args.keep_first {
            return KeepChoice::First.select(conflict).cloned();
        }

        let names: Vec<String> = conflict
            .contenders()
            .iter()
            .map(FragmentName::file_name)
            .collect();

        let selection = Select::new()
            .with_prompt(format!(
                "Which fragment keeps sequence {:03}? (Esc to skip)",
                conflict.sequence()
            ))
            .items(&names)
            .default(0)
            .interact_on_opt(&Term::stderr());

        match selection {
            Ok(Some(index)) => KeepChoice::FileName(names[index].clone())
                .select(conflict)
                .cloned(),
            Ok(None) => None,
            Err(e) => {
                self.reporter.report_error(e);
                None
            }
        }
    }

    /// Renumber every conflict in `ctx`, re-auditing after each fix
    ///
    /// Returns how many conflicts remain.
    fn fix_context(&self, ctx: &ExecutionContext) -> Result<usize, DiscoveryError> {
        let scripts_dir = self.config.scripts_directory();
        let mut handled = BTreeSet::new();

        loop {
            let current = audit(&RealFileSystem, scripts_dir, ctx)?;

            let Some(conflict) = current
                .conflicts()
                .iter()
                .find(|conflict| !handled.contains(&conflict.sequence()))
            else {
                return Ok(current.conflicts().len());
            };
            handled.insert(conflict.sequence());

            self.print_conflict(ctx, conflict);

            let Some(keep) = self.choose_keep(conflict) else {
                self.reporter
                    .report_info(format!("Skipped sequence {:03}", conflict.sequence()));
                continue;
            };

            match renumber(&RealFileSystem, scripts_dir, conflict, &keep) {
                Ok(report) => {
                    for rename in report.renamed() {
                        self.reporter.report_success(format!(
                            "Renamed {} -> {}",
                            rename.from().display(),
                            rename.to().display()
                        ));
                    }
                    for failure in report.failed() {
                        self.reporter.report_error(failure);
                    }
                }
                Err(e) => self.reporter.report_error(e),
            }
        }
    }
}

impl HandleCommand for CheckCommand<'_> {
    fn handle_command(&self) -> i32 {
        if self.args.fix && !self.args.keep_first && !Term::stderr().is_term() {
            self.reporter
                .report_error("Cannot ask which fragment to keep without a terminal");
            self.reporter
                .report_suggestion("Pass `--keep-first` to keep the first fragment in load order");
            return 1;
        }

        let audits = match self.audits() {
            Ok(audits) => audits,
            Err(e) => {
                report_discovery_error(&e, self.reporter);
                return 1;
            }
        };
        debug!("Auditing {} contexts", audits.len());

        let mut unresolved = 0;

        for context_audit in &audits {
            let ctx = context_audit.context();

            if context_audit.is_clean() {
                if !self.args.all {
                    self.reporter.report_success(format!("No conflicts in {ctx}"));
                }
                continue;
            }

            if self.args.fix {
                info!("Fixing conflicts in {ctx}");
                match self.fix_context(ctx) {
                    Ok(remaining) => unresolved += remaining,
                    Err(e) => {
                        report_discovery_error(&e, self.reporter);
                        return 1;
                    }
                }
            } else {
                for conflict in context_audit.conflicts() {
                    self.print_conflict(ctx, conflict);
                }
                unresolved += context_audit.conflicts().len();
            }
        }

        if unresolved == 0 {
            if self.args.all {
                self.reporter.report_success(format!(
                    "No conflicts in {} contexts",
                    audits.len()
                ));
            }
            0
        } else {
            self.reporter
                .report_error(format!("{unresolved} sequence conflicts remain"));
            if !self.args.fix {
                self.reporter
                    .report_suggestion("Run `rc check --fix` to renumber conflicting fragments");
            }
            1
        }
    }
}

use std::path::PathBuf;

use rcforge::{
    checksum::{ChecksumError, ChecksumStatus, ChecksumStore, Sha256Checksum},
    config::AppConfig,
    fs::RealFileSystem,
};
use tracing::debug;

use crate::{
    cli::ChecksumArgs, formatters::format_dim, tables::ListTableReporter,
    terminal_progress_reporter::TerminalProgressReporter,
};

use super::HandleCommand;

type Store<'a> = ChecksumStore<'a, RealFileSystem, Sha256Checksum<RealFileSystem>>;

pub(crate) struct ChecksumCommand<'a> {
    config: &'a AppConfig,
    args: &'a ChecksumArgs,
    reporter: TerminalProgressReporter,
}

impl<'a> ChecksumCommand<'a> {
    pub(crate) fn new(
        config: &'a AppConfig,
        args: &'a ChecksumArgs,
        reporter: TerminalProgressReporter,
    ) -> Self {
        Self {
            config,
            args,
            reporter,
        }
    }

    /// Records are keyed by full path, so relative arguments are made absolute
    fn files(&self) -> Vec<PathBuf> {
        if self.args.files.is_empty() {
            self.config.checksum_files().to_vec()
        } else {
            self.args
                .files
                .iter()
                .map(|file| std::path::absolute(file).unwrap_or_else(|_| file.clone()))
                .collect()
        }
    }

    fn update(&self, store: &Store<'_>) -> i32 {
        let mut exit_code = 0;

        for file in self.files() {
            match store.record(&file) {
                Ok(digest) => {
                    debug!("{} = {digest}", file.display());
                    self.reporter
                        .report_success(format!("Recorded checksum for {}", file.display()));
                }
                Err(ChecksumError::Missing(_)) => {
                    self.reporter
                        .report_warning(format!("Skipping {}: file does not exist", file.display()));
                }
                Err(e) => {
                    self.reporter.report_error(e);
                    exit_code = 1;
                }
            }
        }

        exit_code
    }

    fn verify(&self, store: &Store<'_>) -> i32 {
        let use_colors = self.config.use_colors();
        let mut table = ListTableReporter::new(vec!["File", "Status"]);
        let mut exit_code = 0;
        let mut untracked = false;

        for file in self.files() {
            let status = match store.verify(&file) {
                Ok(status) => status,
                Err(e) => {
                    self.reporter.report_error(e);
                    exit_code = 1;
                    continue;
                }
            };

            let label = match &status {
                ChecksumStatus::Unchanged => self.reporter.format_success(&status),
                ChecksumStatus::Modified { .. } => {
                    exit_code = 1;
                    self.reporter.format_error(&status)
                }
                ChecksumStatus::Untracked => {
                    untracked = true;
                    self.reporter.format_warning(&status)
                }
                ChecksumStatus::Missing => format_dim(&status, use_colors),
            };

            table.add_row(vec![file.display().to_string(), label]);
        }

        table.print();

        if exit_code != 0 {
            self.reporter
                .report_suggestion("Review the changes, then run `rc checksum --update`");
        } else if untracked {
            self.reporter
                .report_suggestion("Run `rc checksum --update` to start tracking these files");
        }

        exit_code
    }
}

impl HandleCommand for ChecksumCommand<'_> {
    fn handle_command(&self) -> i32 {
        let checksum = Sha256Checksum::new(RealFileSystem);
        let store = ChecksumStore::new(
            &RealFileSystem,
            &checksum,
            self.config.checksum_directory(),
        );

        if self.args.update {
            self.update(&store)
        } else {
            self.verify(&store)
        }
    }
}

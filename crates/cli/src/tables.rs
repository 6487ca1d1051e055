use comfy_table::{
    ContentArrangement, Row, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL_CONDENSED,
};
use rcforge::validation::{ValidationIssue, ValidationLevel};

use crate::terminal_progress_reporter::TerminalProgressReporter;

fn styled_table(header: Vec<&'static str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    table
}

/// Configuration issues, printed to stderr
pub(crate) struct ValidationTableReporter {
    table: Table,
}

impl ValidationTableReporter {
    pub(crate) fn new() -> Self {
        Self {
            table: styled_table(vec!["Category", "Field", "Message", "Suggestion"]),
        }
    }

    pub(crate) fn add_issues<'a>(
        &mut self,
        issues: impl IntoIterator<Item = &'a ValidationIssue>,
        reporter: TerminalProgressReporter,
    ) -> &mut Self {
        for issue in issues {
            let category = match issue.level() {
                ValidationLevel::Error => reporter.format_error(issue.category()),
                ValidationLevel::Warning => reporter.format_warning(issue.category()),
            };

            self.table.add_row(vec![
                category,
                issue.field().to_string(),
                issue.message().to_string(),
                issue.suggestion().unwrap_or_default().to_string(),
            ]);
        }

        self
    }

    pub(crate) fn print(&self) {
        eprintln!("{}", &self.table);
    }
}

/// Fragment, utility, and checksum listings, printed to stdout
pub(crate) struct ListTableReporter {
    table: Table,
}

impl ListTableReporter {
    pub(crate) fn new(header: Vec<&'static str>) -> Self {
        Self {
            table: styled_table(header),
        }
    }

    pub(crate) fn add_row<T: Into<Row>>(&mut self, row: T) -> &mut Self {
        self.table.add_row(row);
        self
    }

    pub(crate) fn print(&self) {
        println!("{}", &self.table);
    }
}

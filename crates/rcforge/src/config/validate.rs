use std::path::Path;

use crate::{
    fs::FileSystem,
    validation::{ValidationErrorCategory, ValidationIssue, ValidationIssues},
};

use super::AppConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    /// List of validation issues found
    ///
    pub(crate) issues: ValidationIssues,
}

impl ValidationResult {
    #[must_use]
    pub fn issues(&self) -> &ValidationIssues {
        &self.issues
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.has_errors()
    }
}

impl AppConfig {
    /// Full validation for the `AppConfig`
    ///
    /// Unusable paths are errors. Directories that do not exist yet and
    /// hostname overrides no fragment could ever match are warnings.
    #[must_use]
    pub fn validate<F>(&self, fs: &F) -> ValidationResult
    where
        F: FileSystem + ?Sized,
    {
        let mut issues = Vec::new();

        for (field, directory) in [
            ("scripts_directory", &self.scripts_directory),
            ("user_utility_directory", &self.user_utility_directory),
            ("system_utility_directory", &self.system_utility_directory),
            ("checksum_directory", &self.checksum_directory),
        ] {
            issues.extend(validate_directory(fs, field, directory));
        }

        for file in &self.checksum_files {
            issues.extend(validate_absolute("checksum_files", file));
        }

        if let Some(hostname) = &self.hostname {
            issues.extend(validate_hostname(hostname));
        }

        ValidationResult {
            issues: issues.into(),
        }
    }
}

fn validate_directory<F>(fs: &F, field: &str, directory: &Path) -> Vec<ValidationIssue>
where
    F: FileSystem + ?Sized,
{
    if directory.as_os_str().is_empty() {
        return vec![ValidationIssue::error(
            ValidationErrorCategory::RequiredField,
            field,
            &format!("The `{field}` field exists, but has no value"),
            Some("Remove the field to use the default, or set an absolute path"),
        )];
    }

    if let Some(issue) = validate_absolute(field, directory) {
        return vec![issue];
    }

    if fs.path_exists(directory) {
        Vec::new()
    } else {
        vec![ValidationIssue::warning(
            ValidationErrorCategory::FileSystem,
            field,
            &format!("Directory does not exist: {}", directory.display()),
            Some("Create the directory before adding files to it"),
        )]
    }
}

fn validate_absolute(field: &str, path: &Path) -> Option<ValidationIssue> {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);

    (!Path::new(expanded.as_ref()).is_absolute()).then(|| {
        ValidationIssue::error(
            ValidationErrorCategory::PathFormat,
            field,
            &format!("Path is not absolute: {}", path.display()),
            Some("Provide an absolute path or one starting with `~/`"),
        )
    })
}

fn validate_hostname(hostname: &str) -> Option<ValidationIssue> {
    let well_formed = !hostname.is_empty()
        && hostname
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if !well_formed {
        return Some(ValidationIssue::warning(
            ValidationErrorCategory::InvalidValue,
            "hostname",
            &format!("`{hostname}` cannot appear in a fragment name"),
            Some("Use only letters, digits, `.` and `-`"),
        ));
    }

    (hostname == "global").then(|| {
        ValidationIssue::warning(
            ValidationErrorCategory::InvalidValue,
            "hostname",
            "`global` is reserved for fragments that apply to every host",
            Some("Use the machine's short hostname"),
        )
    })
}

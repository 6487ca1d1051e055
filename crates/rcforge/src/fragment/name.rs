//! Fragment file name parsing
//!
//! A fragment is named `NNN_scope_shell_description[.sh]`:
//!
//! - `NNN` is a three digit sequence number that controls load order,
//! - `scope` is `global` or a hostname,
//! - `shell` is `common`, `bash`, or `zsh`,
//! - `description` is free text and may itself contain underscores.
//!
//! Anything else is not a fragment and is ignored by discovery.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::context::{ExecutionContext, Shell};

/// Highest sequence number a fragment can carry
pub const MAX_SEQUENCE: u16 = 999;

const GLOBAL_SCOPE: &str = "global";
const SCRIPT_EXTENSION: &str = ".sh";

static FRAGMENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([0-9]{3})_(global|[A-Za-z0-9.-]+)_(common|bash|zsh)_(.+)$")
        .expect("fragment name pattern is valid")
});

/// Which hosts a fragment applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Global,
    Host(String),
}

impl Scope {
    fn parse(token: &str) -> Self {
        if token == GLOBAL_SCOPE {
            Self::Global
        } else {
            Self::Host(token.to_string())
        }
    }

    /// Whether a fragment with this scope is loaded on `hostname`
    #[must_use]
    pub fn applies_to(&self, hostname: &str) -> bool {
        match self {
            Self::Global => true,
            Self::Host(host) => host == hostname,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Global => GLOBAL_SCOPE,
            Self::Host(host) => host,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which shells a fragment applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShellTag {
    Common,
    Bash,
    Zsh,
}

impl ShellTag {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "common" => Some(Self::Common),
            "bash" => Some(Self::Bash),
            "zsh" => Some(Self::Zsh),
            _ => None,
        }
    }

    #[must_use]
    pub fn matches(self, shell: Shell) -> bool {
        matches!(
            (self, shell),
            (Self::Common, _) | (Self::Bash, Shell::Bash) | (Self::Zsh, Shell::Zsh)
        )
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }
}

impl fmt::Display for ShellTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured metadata parsed from a fragment's file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FragmentName {
    sequence: u16,
    scope: Scope,
    shell_tag: ShellTag,
    description: String,
    has_extension: bool,
    path: PathBuf,
}

impl FragmentName {
    /// Parse a bare file name
    ///
    /// The returned name's path is the file name itself; use
    /// [`FragmentName::from_path`] for files found on disk.
    #[must_use]
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = FRAGMENT_NAME.captures(file_name)?;

        let sequence = captures[1].parse().ok()?;
        let scope = Scope::parse(&captures[2]);
        let shell_tag = ShellTag::parse(&captures[3])?;

        let remainder = &captures[4];
        let (description, has_extension) = match remainder.strip_suffix(SCRIPT_EXTENSION) {
            Some(stem) => (stem, true),
            None => (remainder, false),
        };

        if description.is_empty() {
            return None;
        }

        Some(Self {
            sequence,
            scope,
            shell_tag,
            description: description.to_string(),
            has_extension,
            path: PathBuf::from(file_name),
        })
    }

    /// Parse the file name component of `path`
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let mut name = Self::parse(file_name)?;
        name.path = path.to_path_buf();

        Some(name)
    }

    #[must_use]
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    #[must_use]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    #[must_use]
    pub fn shell_tag(&self) -> ShellTag {
        self.shell_tag
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this fragment is loaded in `ctx`
    #[must_use]
    pub fn applies_to(&self, ctx: &ExecutionContext) -> bool {
        self.scope.applies_to(ctx.hostname()) && self.shell_tag.matches(ctx.shell())
    }

    /// The file name this fragment would have with a different sequence number
    ///
    /// Every other field, including the extension, is preserved.
    #[must_use]
    pub fn file_name_with_sequence(&self, sequence: u16) -> String {
        format!(
            "{sequence:03}_{}_{}_{}{}",
            self.scope,
            self.shell_tag,
            self.description,
            if self.has_extension {
                SCRIPT_EXTENSION
            } else {
                ""
            }
        )
    }

    /// The canonical file name for this fragment
    #[must_use]
    pub fn file_name(&self) -> String {
        self.file_name_with_sequence(self.sequence)
    }
}

impl fmt::Display for FragmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

//! Execution context: which host and which shell a fragment set is resolved for.

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable the login shell path is read from
const SHELL_ENV: &str = "SHELL";

/// Shells rcforge knows how to configure
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    #[default]
    Bash,
    Zsh,
}

impl Shell {
    /// Every supported shell, in audit order
    pub const ALL: [Shell; 2] = [Shell::Bash, Shell::Zsh];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Zsh => "zsh",
        }
    }

    /// Infer the shell from a program path such as `/usr/bin/zsh`
    #[must_use]
    pub fn from_program_path(program: &str) -> Option<Self> {
        let name = program.rsplit('/').next().unwrap_or(program);
        let name = name.strip_prefix('-').unwrap_or(name);

        name.parse().ok()
    }

    /// Infer the user's shell from `$SHELL`
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var(SHELL_ENV)
            .ok()
            .and_then(|program| Self::from_program_path(&program))
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported shell '{0}': expected 'bash' or 'zsh'")]
pub struct ShellParseError(String);

impl FromStr for Shell {
    type Err = ShellParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bash" => Ok(Self::Bash),
            "zsh" => Ok(Self::Zsh),
            other => Err(ShellParseError(other.to_string())),
        }
    }
}

/// The `(hostname, shell)` pair that fragments are resolved against
///
/// Built once per discovery or resolution call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExecutionContext {
    hostname: String,
    shell: Shell,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(hostname: impl Into<String>, shell: Shell) -> Self {
        Self {
            hostname: hostname.into(),
            shell,
        }
    }

    /// Context for this machine, using the short form of the OS hostname
    #[must_use]
    pub fn for_local_host(shell: Shell) -> Self {
        Self::new(local_hostname(), shell)
    }

    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    #[must_use]
    pub fn shell(&self) -> Shell {
        self.shell
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hostname, self.shell)
    }
}

/// First label of a hostname (`build01.example.com` -> `build01`)
#[must_use]
pub fn short_hostname(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

/// Short hostname of the local machine
///
/// Falls back to `$HOSTNAME`, then `localhost`, when the OS cannot tell us.
#[must_use]
pub fn local_hostname() -> String {
    let full = os_hostname()
        .or_else(|| std::env::var("HOSTNAME").ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "localhost".to_string());

    short_hostname(&full).to_string()
}

#[cfg(unix)]
fn os_hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(name) => name.into_string().ok(),
        Err(err) => {
            tracing::debug!("gethostname failed: {err}");
            None
        }
    }
}

#[cfg(not(unix))]
fn os_hostname() -> Option<String> {
    std::env::var("COMPUTERNAME").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!("bash".parse::<Shell>(), Ok(Shell::Bash));
        assert_eq!("zsh".parse::<Shell>(), Ok(Shell::Zsh));
        assert!("fish".parse::<Shell>().is_err());
        assert!("Bash".parse::<Shell>().is_err());
    }

    #[test]
    fn test_shell_from_program_path() {
        assert_eq!(Shell::from_program_path("/bin/bash"), Some(Shell::Bash));
        assert_eq!(
            Shell::from_program_path("/usr/local/bin/zsh"),
            Some(Shell::Zsh)
        );
        assert_eq!(Shell::from_program_path("-zsh"), Some(Shell::Zsh));
        assert_eq!(Shell::from_program_path("/usr/bin/fish"), None);
    }

    #[test]
    fn test_short_hostname() {
        assert_eq!(short_hostname("build01.example.com"), "build01");
        assert_eq!(short_hostname("laptop"), "laptop");
        assert_eq!(short_hostname(""), "");
    }

    #[test]
    fn test_local_hostname_is_short() {
        let hostname = local_hostname();
        assert!(!hostname.is_empty());
        assert!(!hostname.contains('.'));
    }

    #[test]
    fn test_context_display() {
        let ctx = ExecutionContext::new("laptop", Shell::Zsh);
        assert_eq!(ctx.to_string(), "laptop/zsh");
        assert_eq!(ctx.hostname(), "laptop");
        assert_eq!(ctx.shell(), Shell::Zsh);
    }

    #[test]
    fn test_shell_deserialize() {
        let shell: Shell = serde_yaml::from_str("zsh").unwrap();
        assert_eq!(shell, Shell::Zsh);
    }
}

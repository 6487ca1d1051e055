// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rcforge::context::Shell;

/// rcforge - A personal shell configuration manager
///
/// Any other subcommand is run as a utility: `rc httpheaders example.com`
/// looks up `httpheaders` in the user and system utility directories.
#[derive(Parser, Debug)]
#[clap(name = "rc", author, version, about, long_about = None)]
pub struct ClapCli {
    /// Override the scripts directory from config
    ///
    #[clap(long, short = 's', global = true)]
    pub(crate) scripts_directory: Option<PathBuf>,

    /// Show detailed output
    ///
    #[clap(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    /// Disable colored output
    ///
    #[clap(long, global = true, default_value_t = false)]
    pub(crate) no_color: bool,

    /// Run the system utility even when a user utility overrides it
    ///
    #[clap(long, default_value_t = false)]
    pub(crate) system: bool,

    /// Subcommand to execute
    ///
    #[clap(subcommand)]
    pub(crate) command: ClapCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ClapCommands {
    /// Print `source` lines for the fragments that apply to this shell
    ///
    /// Intended for shell startup: `eval "$(rc load)"`.
    Load(ContextArgs),

    /// Show the fragments that apply to a host and shell, in load order
    Scripts(ContextArgs),

    /// Check fragments for sequence number conflicts
    Check(CheckArgs),

    /// Run a utility by name
    Run(RunArgs),

    /// List available utilities
    List,

    /// Verify or record checksums of shell rc files
    Checksum(ChecksumArgs),

    /// rcforge: configuration management commands
    ///
    Config(ConfigCommands),

    /// Run a utility by name
    #[clap(external_subcommand)]
    External(Vec<String>),
}

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ContextArgs {
    /// Hostname to resolve for (defaults to this machine's short hostname)
    #[clap(long)]
    pub(crate) hostname: Option<String>,

    /// Shell to resolve for (defaults to the shell named by $SHELL)
    #[clap(long)]
    pub(crate) shell: Option<Shell>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct CheckArgs {
    #[clap(flatten)]
    pub(crate) context: ContextArgs,

    /// Check every host and shell combination named by any fragment
    #[clap(long, conflicts_with_all = ["hostname", "shell"])]
    pub(crate) all: bool,

    /// Renumber conflicting fragments
    #[clap(long)]
    pub(crate) fix: bool,

    /// When fixing, keep the first fragment in load order instead of asking
    #[clap(long, requires = "fix")]
    pub(crate) keep_first: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    /// Search only the system utility directory
    #[clap(long)]
    pub(crate) system: bool,

    /// Name of the utility, without extension
    pub(crate) name: String,

    /// Arguments passed to the utility unchanged
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub(crate) args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ChecksumArgs {
    /// Record current checksums instead of verifying them
    #[clap(long)]
    pub(crate) update: bool,

    /// Files to check (defaults to `checksum_files` from config)
    pub(crate) files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ConfigCommands {
    #[clap(subcommand)]
    pub(crate) command: ConfigSubcommands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum ConfigSubcommands {
    /// Validate the rcforge configuration
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_passes_hyphenated_arguments() {
        let cli = ClapCli::parse_from(["rc", "run", "--system", "foo", "--bar", "-x", "baz"]);

        let ClapCommands::Run(run) = cli.command else {
            panic!("expected run, got {:?}", cli.command);
        };
        assert!(run.system);
        assert_eq!(run.name, "foo");
        assert_eq!(run.args, vec!["--bar", "-x", "baz"]);
    }

    #[test]
    fn test_parse_external_subcommand() {
        let cli = ClapCli::parse_from(["rc", "--system", "httpheaders", "example.com"]);

        assert!(cli.system);
        let ClapCommands::External(args) = cli.command else {
            panic!("expected external, got {:?}", cli.command);
        };
        assert_eq!(args, vec!["httpheaders", "example.com"]);
    }

    #[test]
    fn test_parse_context_args() {
        let cli = ClapCli::parse_from(["rc", "load", "--hostname", "laptop", "--shell", "zsh"]);

        let ClapCommands::Load(context) = cli.command else {
            panic!("expected load, got {:?}", cli.command);
        };
        assert_eq!(context.hostname.as_deref(), Some("laptop"));
        assert_eq!(context.shell, Some(Shell::Zsh));
    }

    #[test]
    fn test_rejects_unknown_shell() {
        assert!(ClapCli::try_parse_from(["rc", "load", "--shell", "fish"]).is_err());
    }

    #[test]
    fn test_all_conflicts_with_hostname() {
        assert!(ClapCli::try_parse_from(["rc", "check", "--all", "--hostname", "x"]).is_err());
        assert!(ClapCli::try_parse_from(["rc", "check", "--keep-first"]).is_err());
        assert!(ClapCli::try_parse_from(["rc", "check", "--all", "--fix", "--keep-first"]).is_ok());
    }
}

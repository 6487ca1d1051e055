use rcforge::config::{AppConfig, loader::ApplyToConfig};

use crate::cli::ClapCli;

impl ApplyToConfig for ClapCli {
    fn apply_to_config(&self, mut config: AppConfig) -> AppConfig {
        // Override scripts directory if specified
        if let Some(dir) = self.scripts_directory.as_ref() {
            *config.scripts_directory_mut() = dir.clone();
        }

        // Flags can only enable verbose output or disable colors
        if self.verbose {
            *config.verbose_mut() = true;
        }
        if self.no_color {
            *config.use_colors_mut() = false;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rcforge::config::AppConfigBuilder;
    use std::path::Path;

    // Helper to create CLI args
    struct FakeArgs {
        scripts_directory: Option<&'static str>,
        verbose: bool,
        no_color: bool,
    }

    impl FakeArgs {
        fn into_cli(self) -> ClapCli {
            let mut args = vec!["rc"];

            if let Some(dir) = self.scripts_directory {
                args.push("--scripts-directory");
                args.push(dir);
            }

            if self.verbose {
                args.push("--verbose");
            }

            if self.no_color {
                args.push("--no-color");
            }

            // Add a required subcommand
            args.push("config");
            args.push("validate");

            ClapCli::parse_from(args)
        }
    }

    fn original_config() -> AppConfig {
        AppConfigBuilder::default()
            .scripts_directory("/original/rc-scripts")
            .user_utility_directory("/original/utils")
            .hostname("laptop")
            .verbose(false)
            .use_colors(true)
            .build()
    }

    #[test]
    fn test_apply_cli_args_scripts_dir_override() {
        let args = FakeArgs {
            scripts_directory: Some("/cli/rc-scripts"),
            verbose: false,
            no_color: false,
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert_eq!(updated.scripts_directory(), Path::new("/cli/rc-scripts"));
        assert!(!updated.verbose());
        assert!(updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_ui_settings() {
        let args = FakeArgs {
            scripts_directory: None,
            verbose: true,
            no_color: true,
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert_eq!(
            updated.scripts_directory(),
            Path::new("/original/rc-scripts")
        );
        assert!(updated.verbose());
        assert!(!updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_no_overrides_keeps_config_values() {
        let config = AppConfigBuilder::default()
            .scripts_directory("/original/rc-scripts")
            .verbose(true)
            .use_colors(false)
            .build();

        let args = FakeArgs {
            scripts_directory: None,
            verbose: false,
            no_color: false,
        }
        .into_cli();

        let updated = args.apply_to_config(config);

        assert!(updated.verbose());
        assert!(!updated.use_colors());
    }

    #[test]
    fn test_apply_cli_args_preserves_other_settings() {
        let args = FakeArgs {
            scripts_directory: Some("/cli/rc-scripts"),
            verbose: true,
            no_color: true,
        }
        .into_cli();

        let updated = args.apply_to_config(original_config());

        assert_eq!(updated.user_utility_directory(), Path::new("/original/utils"));
        assert_eq!(updated.hostname(), Some("laptop"));
    }
}

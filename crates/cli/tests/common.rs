use assert_cmd::Command;
use test_common::{CONFIG_DIR_ENV, DATA_DIR_ENV, RcForgeHome};

// Helper function to get a command instance with environment variables pointing at `home`
#[must_use]
pub fn rc_cmd(home: &RcForgeHome) -> Command {
    let mut cmd = Command::cargo_bin("rc").unwrap();

    cmd.env(CONFIG_DIR_ENV, home.config_dir())
        .env(DATA_DIR_ENV, home.data_dir())
        .env("HOME", home.path())
        .env("SHELL", "/bin/bash")
        .env("NO_COLOR", "1")
        .arg("--no-color");

    cmd
}

// Helper function to get a command instance
#[must_use]
pub fn get_command() -> Command {
    Command::cargo_bin("rc").unwrap()
}

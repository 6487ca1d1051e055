#![cfg(unix)]

pub mod common;

use common::rc_cmd;
use predicates::prelude::*;
use test_common::RcForgeHome;

// Kept in one test: scripts written while another thread forks can fail to
// exec with ETXTBSY.
#[test]
fn test_run_resolution_and_exit_codes() {
    let home = RcForgeHome::new();
    home.add_user_utility("greet.sh", "echo \"user $*\"\nexit 7");
    home.add_system_utility("greet.sh", "echo system");
    home.add_user_utility("dup.sh", "exit 0");
    home.add_user_utility("dup.py", "exit 0");

    // External subcommand form
    rc_cmd(&home)
        .args(["greet", "hello", "--loud"])
        .assert()
        .code(7)
        .stdout("user hello --loud\n");

    // `--system` bypasses the override
    rc_cmd(&home)
        .args(["--system", "greet"])
        .assert()
        .success()
        .stdout("system\n");

    rc_cmd(&home)
        .args(["run", "--system", "greet"])
        .assert()
        .success()
        .stdout("system\n");

    rc_cmd(&home)
        .args(["nope"])
        .assert()
        .code(127)
        .stderr(predicate::str::contains("command not found: nope"));

    rc_cmd(&home)
        .args(["run", "dup"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dup.py"))
        .stderr(predicate::str::contains("dup.sh"));
}

pub mod common;

use common::rc_cmd;
use predicates::prelude::*;
use test_common::{OTHER_HOST, RcForgeHome, TEST_HOST, file_names};

#[test]
fn test_check_clean_context() {
    let home = RcForgeHome::new();
    home.add_fragments(&["100_global_common_env.sh", "200_global_bash_prompt.sh"]);

    let mut cmd = rc_cmd(&home);
    cmd.args(["check", "--hostname", TEST_HOST, "--shell", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No conflicts in"));
}

#[test]
fn test_check_reports_conflicts() {
    let home = RcForgeHome::new();
    home.add_fragments(&["200_global_common_a.sh", "200_global_common_b.sh"]);

    let mut cmd = rc_cmd(&home);
    cmd.args(["check", "--hostname", TEST_HOST, "--shell", "bash"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("sequence 200 is used by 2 fragments"))
        .stderr(predicate::str::contains("rc check --fix"));
}

#[test]
fn test_check_all_finds_host_only_conflicts() {
    let home = RcForgeHome::new();
    home.add_fragments(&[
        "100_global_common_env.sh",
        "300_otherhost_zsh_a.sh",
        "300_otherhost_zsh_b.sh",
    ]);

    let mut cmd = rc_cmd(&home);
    cmd.args(["check", "--all"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains(format!("{OTHER_HOST}/zsh")));
}

#[test]
fn test_check_fix_keep_first_renumbers() {
    let home = RcForgeHome::new();
    home.add_fragments(&["200_global_common_a.sh", "200_global_common_b.sh"]);

    let mut cmd = rc_cmd(&home);
    cmd.args([
        "check",
        "--hostname",
        TEST_HOST,
        "--shell",
        "bash",
        "--fix",
        "--keep-first",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("201_global_common_b.sh"));

    assert_eq!(
        file_names(&home.scripts_dir()),
        vec!["200_global_common_a.sh", "201_global_common_b.sh"]
    );

    let mut cmd = rc_cmd(&home);
    cmd.args(["check", "--hostname", TEST_HOST, "--shell", "bash"]);
    cmd.assert().success();
}

#[test]
fn test_check_fix_without_terminal_requires_keep_first() {
    let home = RcForgeHome::new();
    home.add_fragments(&["200_global_common_a.sh", "200_global_common_b.sh"]);

    let mut cmd = rc_cmd(&home);
    cmd.args(["check", "--hostname", TEST_HOST, "--shell", "bash", "--fix"]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("--keep-first"));

    assert_eq!(
        file_names(&home.scripts_dir()),
        vec!["200_global_common_a.sh", "200_global_common_b.sh"]
    );
}

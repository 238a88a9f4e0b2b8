//! Behavioural smoke test for the CLI entrypoint.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

#[test]
fn cli_help_lists_create_server() {
    let mut cmd = cargo_bin_cmd!("hpcloud");
    cmd.arg("--help");
    cmd.assert().success().stdout(contains("create-server"));
}

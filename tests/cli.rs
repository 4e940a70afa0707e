//! End-to-end tests of the `chew` binary. Under the test harness stderr is a
//! pipe, so interactive commands refuse to run and `spin`/`progress` run
//! headless.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn chew() -> Command {
	let mut cmd = Command::cargo_bin("chew").expect("chew binary");
	cmd.arg("--no-config").env_remove("CHEW_LOG").env_remove("CHEW_CONFIG");
	cmd
}

#[test]
fn list_spinners_prints_names() {
	chew()
		.arg("--list-spinners")
		.assert()
		.success()
		.stdout(predicate::str::contains("dots").and(predicate::str::contains("line")));
}

#[test]
fn list_themes_prints_names() {
	chew()
		.arg("--list-themes")
		.assert()
		.success()
		.stdout("default\nlight\n");
}

#[cfg(unix)]
#[test]
fn spin_passes_the_exit_code_through() {
	chew()
		.args(["spin", "--", "sh", "-c", "echo hidden; exit 3"])
		.assert()
		.code(3)
		.stdout("");
}

#[cfg(unix)]
#[test]
fn spin_show_output_replays_both_streams() {
	chew()
		.args(["spin", "--show-output", "--", "sh", "-c", "echo out; echo err >&2"])
		.assert()
		.success()
		.stdout("out\n")
		.stderr(predicate::str::contains("err"));
}

#[cfg(unix)]
#[test]
fn spin_show_error_only_speaks_on_failure() {
	chew()
		.args(["spin", "--show-error", "--", "sh", "-c", "echo fine"])
		.assert()
		.success()
		.stdout("")
		.stderr(predicate::str::contains("fine").not());

	chew()
		.args(["spin", "--show-error", "--", "sh", "-c", "echo broken; exit 2"])
		.assert()
		.code(2)
		.stdout("")
		.stderr(predicate::str::contains("broken"));
}

#[cfg(unix)]
#[test]
fn spin_timeout_cancels_with_130() {
	chew()
		.args(["--tick-rate", "20", "spin", "--timeout", "200ms", "--", "sleep", "5"])
		.assert()
		.code(130);
}

#[test]
fn spin_reports_commands_that_cannot_start() {
	chew()
		.args(["spin", "--", "chew-test-no-such-program"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains("failed to start `chew-test-no-such-program`"));
}

#[test]
fn search_select_if_one_skips_the_prompt() {
	chew()
		.args(["search", "--value", "fb", "--select-if-one"])
		.write_stdin("foobar.go\nbaz\nqux\n")
		.assert()
		.success()
		.stdout("foobar.go\n");
}

#[test]
fn search_json_output_carries_query_and_index() {
	let assert = chew()
		.args(["filter", "--value", "qx", "--select-if-one", "-o", "json"])
		.write_stdin("foobar.go\nbaz\nqux\n")
		.assert()
		.success();

	let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).expect("json");
	assert_eq!(value["query"], "qx");
	assert_eq!(value["selected"][0], "qux");
	assert_eq!(value["indices"][0], 2);
}

#[test]
fn search_without_a_terminal_fails() {
	chew()
		.args(["search", "--value", "o"])
		.write_stdin("one\ntwo\n")
		.assert()
		.code(1)
		.stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn search_with_empty_input_fails() {
	chew()
		.arg("search")
		.write_stdin("\n\n")
		.assert()
		.code(1)
		.stderr(predicate::str::contains("nothing to search"));
}

#[test]
fn input_needs_a_terminal() {
	chew()
		.arg("input")
		.assert()
		.code(1)
		.stdout("")
		.stderr(predicate::str::contains("`chew input` needs a terminal"));
}

#[test]
fn progress_runs_headless() {
	chew()
		.args(["--tick-rate", "10", "progress", "--time", "100ms"])
		.assert()
		.success()
		.stdout("");
}

#[test]
fn invalid_cli_value_names_the_key() {
	chew()
		.args(["spin", "--spinner", "bogus", "--", "true"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains("spin.spinner").and(predicate::str::contains("--spinner")));
}

#[test]
fn invalid_config_file_names_the_key() {
	let dir = TempDir::new().expect("tempdir");
	let path = dir.path().join("chew.toml");
	fs::write(&path, "[search]\nheight = 0\n").expect("write config");

	chew()
		.arg("--config")
		.arg(&path)
		.args(["progress", "--time", "0s"])
		.assert()
		.code(1)
		.stderr(predicate::str::contains("search.height"));
}

#[test]
fn print_config_goes_to_stderr() {
	chew()
		.args(["--print-config", "progress", "--time", "0s"])
		.assert()
		.success()
		.stdout("")
		.stderr(predicate::str::contains("dots"));
}

//! End-to-end CLI tests for the `flc` compiler tool, covering every
//! concrete scenario §8 names.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn flc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flc"))
}

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp source file");
    write!(file, "{contents}").expect("failed to write temp source file");
    file
}

#[test]
fn scenario_1_addition_and_multiplication_precedence() {
    let file = source_file("def Main(): { return 2 + 3 * 4; };");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: 14"));
}

#[test]
fn scenario_2_division_produces_a_fractional_result() {
    let file = source_file("def Main(): { let a = 10; return a / 4; };");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: 2.5"));
}

#[test]
fn scenario_3_left_associative_subtraction() {
    let file = source_file("def Main(): { return 1 - 2 - 3; };");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: -4"));
}

#[test]
fn scenario_4_leading_dot_real_literal() {
    let file = source_file("def Main(): { return .5 + 1.5; };");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: 2"));
}

#[test]
fn scenario_6_missing_main_reports_the_exact_diagnostic() {
    let file = source_file("def NotMain(): { return 1; };");
    flc_bin()
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No 'Main()' function found"));
}

#[test]
fn missing_argument_exits_with_failure() {
    flc_bin().assert().failure().code(1);
}

#[test]
fn unreadable_file_path_exits_with_failure() {
    flc_bin().arg("/nonexistent/path/does-not-exist.flc").assert().failure().code(1);
}

#[test]
fn unknown_identifier_is_a_fatal_evaluation_error() {
    let file = source_file("def Main(): { return unbound + 1; };");
    flc_bin().arg(file.path()).assert().failure().code(1);
}

#[test]
fn bare_expression_body_without_a_block_also_runs() {
    let file = source_file("def Main(): 7 * 6;");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: 42"));
}

#[test]
fn multiple_function_declarations_still_resolve_main() {
    let file = source_file("def helper(x): { return x * 2; }; def Main(): { let y = 21; return y * 2; };");
    flc_bin().arg(file.path()).assert().success().stdout(predicate::str::contains("Result: 42"));
}

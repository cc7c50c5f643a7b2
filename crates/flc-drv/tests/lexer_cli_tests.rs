//! End-to-end tests for the `flc-lexer` tool (§6 "Lexer tool", §8
//! "Scanner on ... keeping whitespace yields 36 tokens").

use assert_cmd::Command;
use predicates::prelude::*;

fn lexer_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flc-lexer"))
}

#[test]
fn literal_kind_lines_carry_no_slice() {
    lexer_bin().write_stdin("+").assert().success().stdout(predicate::str::diff("Plus\n"));
}

#[test]
fn data_bearing_kind_lines_carry_their_slice() {
    lexer_bin().write_stdin("myVar").assert().success().stdout(predicate::str::diff("Ident: myVar\n"));
}

#[test]
fn whitespace_between_tokens_produces_no_line_of_its_own() {
    lexer_bin()
        .write_stdin("a   +   b")
        .assert()
        .success()
        .stdout(predicate::str::diff("Ident: a\nPlus\nIdent: b\n"));
}

#[test]
fn a_full_function_declaration_lexes_token_by_token() {
    lexer_bin()
        .write_stdin("def f(): { return 1; };")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("FnIntro")
                .and(predicate::str::contains("Ident: f"))
                .and(predicate::str::contains("Return"))
                .and(predicate::str::contains("IntLit: 1")),
        );
}

//! `flc-lexer` - the lexer tool (§6 "Lexer tool").
//!
//! Reads all of standard input, scans it, and writes one line per
//! non-whitespace token: `<kind>` for literal kinds, `<kind: slice>` for
//! data-bearing kinds.
//!
//! Grounded on `original_source/src/lexer.main.cpp`, which slurps stdin
//! into one buffer and debug-prints every token from an eagerly-built
//! scan; this keeps that shape rather than the `flc` binary's
//! stage-by-stage `Config`/`run` split, since there is only one stage here.

use std::io::{Read, Write};

use flc_lex::{scan, strip_whitespace, KindAttribute};

fn main() {
    let mut input = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut input) {
        eprintln!("error: failed to read standard input: {e}");
        std::process::exit(1);
    }

    let tokens = strip_whitespace(scan(&input));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for token in tokens {
        let kind = token.kind;
        let line = match kind.attribute() {
            KindAttribute::Literal(_) => format!("{kind:?}"),
            KindAttribute::DataBearing => {
                let slice = String::from_utf8_lossy(token.slice(&input));
                format!("{kind:?}: {slice}")
            }
        };
        if writeln!(out, "{line}").is_err() {
            break;
        }
    }
}

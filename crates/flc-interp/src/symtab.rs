//! The function symbol table (§4.5): given a function name, resolve the
//! post-order index of its body's first token — the token immediately
//! after the parameter list's closing `)` (the `:` fence is dropped by the
//! parser, so that `)` is already adjacent to the body in the post-order
//! stream).
//!
//! §4.5 leaves construction out of scope for the interpreter's own
//! contract, naming it only as "a lookup operation" the interpreter
//! consumes; this module is that collaborator's implementation.
//!
//! `original_source/src/noctern/symbol_table.cpp` builds the equivalent
//! table with a loop that jumps the scan position by a fixed offset
//! (`it[2]`) past each `def` header, a shortcut that is only correct when
//! every function has exactly zero parameters — it desyncs on any other
//! arity. This scan instead walks forward from each `FnIntro` counting
//! parameter `Ident`s until the arity-fence `)`, so it resolves correctly
//! regardless of parameter count.

use flc_lex::TokenKind;
use flc_tok::{TokenHandle, TokensStore};
use rustc_hash::FxHashMap;

use crate::error::{EvalError, EvalResult};

/// Maps a function's name to the post-order index its body starts at.
#[derive(Debug, Default)]
pub struct SymbolTable {
    functions: FxHashMap<String, usize>,
}

impl SymbolTable {
    /// Scans a whole file's post-order stream, recording every `def`'s
    /// name and body-start index. Declarations are independent of one
    /// another in this scan (§5 "within a file, declarations are
    /// processed in source order"), so a single left-to-right pass
    /// suffices; struct declarations have no `FnIntro` token and are
    /// simply skipped over.
    pub fn build(store: &TokensStore, postorder: &[TokenHandle]) -> SymbolTable {
        let mut functions = FxHashMap::default();
        let mut i = 0;

        while i < postorder.len() {
            if store.kind(postorder[i]) == TokenKind::FnIntro {
                let name = store.text(postorder[i + 1]).to_string();

                let mut j = i + 2;
                while store.kind(postorder[j]) == TokenKind::Ident {
                    j += 1;
                }
                debug_assert_eq!(store.kind(postorder[j]), TokenKind::RParen);

                functions.insert(name, j + 1);
            }
            i += 1;
        }

        SymbolTable { functions }
    }

    pub fn body_start(&self, name: &str) -> Option<usize> {
        self.functions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// [`SymbolTable::body_start`], converting absence into
    /// [`EvalError::FunctionNotFound`] for callers that want a `Result`
    /// rather than an `Option`.
    pub fn resolve(&self, name: &str) -> EvalResult<usize> {
        self.body_start(name).ok_or_else(|| EvalError::FunctionNotFound { name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flc_lex::{scan, strip_whitespace};
    use flc_par::parse_postorder;

    fn build(input: &str) -> (TokensStore<'_>, Vec<TokenHandle>, SymbolTable) {
        let store = TokensStore::build(input.as_bytes(), strip_whitespace(scan(input.as_bytes())));
        let postorder = parse_postorder(&store).unwrap();
        let handles = postorder.as_slice().to_vec();
        let table = SymbolTable::build(&store, &handles);
        (store, handles, table)
    }

    #[test]
    fn resolves_a_zero_arity_function() {
        let (_, _, table) = build("def Main(): 1;");
        assert!(table.contains("Main"));
    }

    #[test]
    fn resolves_multi_parameter_functions_without_desyncing() {
        let (store, handles, table) = build("def add(a, b, c): { return a + b + c; }; def Main(): add(1, 2, 3);");
        let start = table.body_start("add").unwrap();
        assert_eq!(store.kind(handles[start]), TokenKind::LBrace);
        assert!(table.contains("Main"));
    }

    #[test]
    fn unknown_function_name_resolves_to_none() {
        let (_, _, table) = build("def Main(): 1;");
        assert_eq!(table.body_start("NotThere"), None);
    }
}

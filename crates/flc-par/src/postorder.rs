//! The flat post-order token emitter (§4.3 "Two output shapes" / "Post-order
//! token stream").
//!
//! Mirrors `original_source/src/noctern/parser.cpp`'s explicit rule/action
//! stack machine in *effect* (same output shape, same left-associativity),
//! but is written as ordinary recursive descent over the same [`Cursor`]
//! the AST builder uses, per §9 "Recursion vs. explicit stack" — "either is
//! acceptable provided the grammar and left-associativity laws hold."
//!
//! The output is a permutation of the input's own [`TokenHandle`]s, not a
//! new token sequence: §3's post-order stream is defined as "the same
//! tokens reordered", so this never allocates a new token, only a new
//! ordering of handles into the store that produced them.

use flc_lex::TokenKind;
use flc_tok::{TokenHandle, TokensStore};

use crate::cursor::Cursor;
use crate::error::ParseResult;

/// A post-order-reordered view over a [`TokensStore`]'s handles.
#[derive(Debug, Clone, Default)]
pub struct PostorderStream {
    handles: Vec<TokenHandle>,
}

impl PostorderStream {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn handle_at(&self, index: usize) -> Option<TokenHandle> {
        self.handles.get(index).copied()
    }

    pub fn as_slice(&self) -> &[TokenHandle] {
        &self.handles
    }
}

/// Parses a whole file into its post-order token stream.
pub fn parse_postorder(store: &TokensStore) -> ParseResult<PostorderStream> {
    let mut emitter = Emitter { cur: Cursor::new(store), out: Vec::new() };
    emitter.file()?;
    Ok(PostorderStream { handles: emitter.out })
}

struct Emitter<'s, 'a> {
    cur: Cursor<'s, 'a>,
    out: Vec<TokenHandle>,
}

impl<'s, 'a> Emitter<'s, 'a> {
    fn emit(&mut self, handle: TokenHandle) {
        self.out.push(handle);
    }

    fn file(&mut self) -> ParseResult<()> {
        while !self.cur.is_at_end() {
            self.declaration()?;
        }
        Ok(())
    }

    fn declaration(&mut self) -> ParseResult<()> {
        match self.cur.peek_kind() {
            Some(TokenKind::FnIntro) => self.fn_decl(),
            Some(TokenKind::StructIntro) => self.struct_decl(),
            Some(found) => Err(crate::error::ParseError::UnexpectedToken {
                position: self.cur.position(),
                expected: "'def' or 'struct'",
                found,
            }),
            None => Err(crate::error::ParseError::UnexpectedEof { expected: "'def' or 'struct'" }),
        }
    }

    /// `'def' ident '(' params ')' ':' expr ';'` — `(`, `:` dropped; the
    /// param list's closing `)` retained as its arity fence (§4.5 relies on
    /// this to find the body: skip from `def` to the next `)`, the body
    /// starts immediately after).
    fn fn_decl(&mut self) -> ParseResult<()> {
        let kw = self.cur.expect(TokenKind::FnIntro, "'def'")?;
        self.emit(kw);
        let name = self.cur.expect(TokenKind::Ident, "an identifier")?;
        self.emit(name);
        self.cur.expect(TokenKind::LParen, "'('")?;
        self.param_list()?;
        let rparen = self.cur.expect(TokenKind::RParen, "')'")?;
        self.emit(rparen);
        self.cur.expect(TokenKind::FnOutro, "':'")?;
        self.expr()?;
        let semi = self.cur.expect(TokenKind::StatementEnd, "';'")?;
        self.emit(semi);
        Ok(())
    }

    /// `'struct' ident '{' (ident '::' type (',' ident '::' type)* ','?)? '}'`
    /// — `{`/`}` of the attribute list retained (the only structural pair
    /// the grammar has no other arity signal for), `::` dropped.
    fn struct_decl(&mut self) -> ParseResult<()> {
        let kw = self.cur.expect(TokenKind::StructIntro, "'struct'")?;
        self.emit(kw);
        let name = self.cur.expect(TokenKind::Ident, "an identifier")?;
        self.emit(name);
        let lbrace = self.cur.expect(TokenKind::LBrace, "'{'")?;
        self.emit(lbrace);

        while let Some(TokenKind::Ident) = self.cur.peek_kind() {
            let attr_name = self.cur.bump().unwrap();
            self.emit(attr_name);
            self.cur.expect(TokenKind::TypeSep, "'::'")?;
            self.ty()?;

            if !self.cur.eat(TokenKind::Comma) {
                break;
            }
        }

        let rbrace = self.cur.expect(TokenKind::RBrace, "'}'")?;
        self.emit(rbrace);
        Ok(())
    }

    fn param_list(&mut self) -> ParseResult<()> {
        while let Some(TokenKind::Ident) = self.cur.peek_kind() {
            let p = self.cur.bump().unwrap();
            self.emit(p);
            if !self.cur.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(())
    }

    /// Types never feed the interpreter; walked only to stay positioned
    /// correctly, emitting nothing (mirrors dropping `(`/`,`/`:`/`=`:
    /// a type's tokens carry no runtime meaning downstream of the parser).
    fn ty(&mut self) -> ParseResult<()> {
        self.cur.expect(TokenKind::Ident, "a type name")?;

        if self.cur.eat(TokenKind::LBracket) {
            if self.cur.peek_kind() != Some(TokenKind::RBracket) {
                loop {
                    self.ty()?;
                    if !self.cur.eat(TokenKind::Comma) {
                        break;
                    }
                    if self.cur.peek_kind() == Some(TokenKind::RBracket) {
                        break;
                    }
                }
            }
            self.cur.expect(TokenKind::RBracket, "']'")?;
        }

        while self.cur.eat(TokenKind::Arrow) {
            self.ty()?;
        }

        Ok(())
    }

    fn expr(&mut self) -> ParseResult<()> {
        if self.cur.peek_kind() == Some(TokenKind::LBrace) {
            self.block()
        } else {
            self.add_sub()
        }
    }

    /// `'{' valdecl* return_stmt '}'`. The interpreter's `eval_block`
    /// expects, in order: `{`, then for each binding an ident followed by
    /// the value's postorder and a `;` (`let`/`=` dropped), then the
    /// `return` keyword itself (kept — `eval_block` matches on it) followed
    /// by the result's postorder and `;`, then `}`.
    fn block(&mut self) -> ParseResult<()> {
        let lbrace = self.cur.expect(TokenKind::LBrace, "'{'")?;
        self.emit(lbrace);

        while self.cur.peek_kind() == Some(TokenKind::ValDefIntro) {
            self.valdecl()?;
        }

        let ret_kw = self.cur.expect(TokenKind::Return, "'return'")?;
        self.emit(ret_kw);
        self.expr()?;
        let semi = self.cur.expect(TokenKind::StatementEnd, "';'")?;
        self.emit(semi);

        let rbrace = self.cur.expect(TokenKind::RBrace, "'}'")?;
        self.emit(rbrace);
        Ok(())
    }

    /// `'let' ident '=' expr ';'` — `let`/`=` dropped, ident retained.
    fn valdecl(&mut self) -> ParseResult<()> {
        self.cur.expect(TokenKind::ValDefIntro, "'let'")?;
        let name = self.cur.expect(TokenKind::Ident, "an identifier")?;
        self.emit(name);
        self.cur.expect(TokenKind::ValDefOutro, "'='")?;
        self.expr()?;
        let semi = self.cur.expect(TokenKind::StatementEnd, "';'")?;
        self.emit(semi);
        Ok(())
    }

    /// Left-associating loop over same-precedence operators: emits each
    /// operand's postorder, then the operator, so `a - b - c` comes out as
    /// `a b - c -` (§4.4 "On `+ - * /`, pop the two most recent values").
    fn add_sub(&mut self) -> ParseResult<()> {
        self.mul_div()?;
        loop {
            match self.cur.peek_kind() {
                Some(TokenKind::Plus) | Some(TokenKind::Minus) => {
                    let op = self.cur.bump().unwrap();
                    self.mul_div()?;
                    self.emit(op);
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn mul_div(&mut self) -> ParseResult<()> {
        self.call()?;
        loop {
            match self.cur.peek_kind() {
                Some(TokenKind::Mult) | Some(TokenKind::Div) => {
                    let op = self.cur.bump().unwrap();
                    self.call()?;
                    self.emit(op);
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// `primary ('(' (expr (',' expr)*)? ')')*` — each call's argument list
    /// keeps its closing `)` as an arity fence, same as a parameter list.
    fn call(&mut self) -> ParseResult<()> {
        self.primary()?;

        while self.cur.eat(TokenKind::LParen) {
            if self.cur.peek_kind() != Some(TokenKind::RParen) {
                loop {
                    self.expr()?;
                    if !self.cur.eat(TokenKind::Comma) {
                        break;
                    }
                    if self.cur.peek_kind() == Some(TokenKind::RParen) {
                        break;
                    }
                }
            }
            let rparen = self.cur.expect(TokenKind::RParen, "')'")?;
            self.emit(rparen);
        }

        Ok(())
    }

    /// `'(' expr ')' | int_lit | real_lit | string_lit | ident | lambda`.
    /// A grouping's parentheses emit nothing (§4.3 "Parentheses group
    /// without emitting a token").
    fn primary(&mut self) -> ParseResult<()> {
        match self.cur.peek_kind() {
            Some(TokenKind::LParen) => {
                self.cur.bump();
                self.expr()?;
                self.cur.expect(TokenKind::RParen, "')'")?;
                Ok(())
            }
            Some(TokenKind::IntLit) | Some(TokenKind::RealLit) | Some(TokenKind::StringLit) | Some(TokenKind::Ident) => {
                let handle = self.cur.bump().unwrap();
                self.emit(handle);
                Ok(())
            }
            Some(TokenKind::Backslash) => self.lambda(),
            Some(found) => Err(crate::error::ParseError::UnexpectedToken {
                position: self.cur.position(),
                expected: "an expression",
                found,
            }),
            None => Err(crate::error::ParseError::UnexpectedEof { expected: "an expression" }),
        }
    }

    /// `'\' '(' (ident (',' ident)*)? ')' '->' expr`. Never executed by the
    /// interpreter (§1 "Out of scope"), but still walked and flattened for
    /// completeness with the AST-builder shape.
    fn lambda(&mut self) -> ParseResult<()> {
        self.cur.expect(TokenKind::Backslash, "'\\\\'")?;
        self.cur.expect(TokenKind::LParen, "'('")?;
        self.param_list()?;
        self.cur.expect(TokenKind::RParen, "')'")?;
        self.cur.expect(TokenKind::Arrow, "'->'")?;
        self.expr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flc_lex::{scan, strip_whitespace};

    fn kinds(input: &str) -> Vec<TokenKind> {
        let store = TokensStore::build(input.as_bytes(), strip_whitespace(scan(input.as_bytes())));
        let postorder = parse_postorder(&store).unwrap();
        postorder.as_slice().iter().map(|h| store.kind(*h)).collect()
    }

    #[test]
    fn left_associative_subtraction_order() {
        use TokenKind::*;
        // body postorder: a b - c -
        let k = kinds("def f(): { return a - b - c; };");
        let return_idx = k.iter().position(|t| *t == Return).unwrap();
        assert_eq!(&k[return_idx + 1..return_idx + 6], &[Ident, Ident, Minus, Ident, Minus]);
    }

    #[test]
    fn multiplication_precedes_addition_in_postorder() {
        use TokenKind::*;
        // a + b * c -> a b c * +
        let k = kinds("def f(): { return a + b * c; };");
        let return_idx = k.iter().position(|t| *t == Return).unwrap();
        assert_eq!(&k[return_idx + 1..return_idx + 6], &[Ident, Ident, Ident, Mult, Plus]);
    }

    #[test]
    fn parameter_list_close_paren_is_retained() {
        use TokenKind::*;
        let k = kinds("def f(a, b): { return a; };");
        assert_eq!(&k[..4], &[FnIntro, Ident, Ident, Ident]);
        assert_eq!(k[4], RParen);
    }

    #[test]
    fn grouping_parens_emit_nothing() {
        use TokenKind::*;
        // (a + b) * c -> a b + c *
        let k = kinds("def f(): { return (a + b) * c; };");
        let return_idx = k.iter().position(|t| *t == Return).unwrap();
        assert_eq!(&k[return_idx + 1..return_idx + 6], &[Ident, Ident, Plus, Ident, Mult]);
    }

    #[test]
    fn block_retains_braces_and_return_keyword() {
        use TokenKind::*;
        let k = kinds("def f(): { let a = 1; return a; };");
        assert_eq!(k[3], LBrace);
        assert!(k.contains(&Return));
        assert_eq!(*k.last().unwrap(), StatementEnd);
        assert_eq!(k[k.len() - 2], RBrace);
    }

    #[test]
    fn postorder_length_matches_significant_token_count() {
        // whitespace and structural (/, , ,:,= dropped) tokens shrink the
        // stream relative to the full scan (§3 "Post-order token stream"
        // invariant a).
        let input = "def f(a, b): { return a + b; };";
        let store = TokensStore::build(input.as_bytes(), strip_whitespace(scan(input.as_bytes())));
        let postorder = parse_postorder(&store).unwrap();
        assert!(postorder.len() < store.len());
    }
}

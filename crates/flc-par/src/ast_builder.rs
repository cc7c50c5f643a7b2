//! The structured AST builder shape (§4.3 "Two output shapes" / "Structured
//! AST").
//!
//! A straight recursive-descent implementation of the declarative grammar
//! in §4.3: each non-terminal gets one method on [`AstBuilder`], and the
//! recursion stack plays the role §4.3's "state machine" calls *entering*/
//! *consuming*/*finishing* implicitly. Left-associativity for `+ - * /`
//! falls out of parsing each precedence level with a `while` loop rather
//! than right-recursion — same trick the type grammar's `->` chaining uses
//! (see `parse_type`).

use flc_lex::TokenKind;
use flc_tok::TokensStore;

use crate::ast::{AttributeDecl, Binding, Declaration, Expression, File, FunctionDecl, Identifier, StructDecl, Type};
use crate::cursor::Cursor;
use crate::error::ParseResult;

pub struct AstBuilder<'s, 'a> {
    cur: Cursor<'s, 'a>,
}

/// Parses a whole file into a structured AST (§4.3 "Structured AST").
pub fn parse_file(store: &TokensStore) -> ParseResult<File> {
    AstBuilder { cur: Cursor::new(store) }.file()
}

impl<'s, 'a> AstBuilder<'s, 'a> {
    fn file(&mut self) -> ParseResult<File> {
        let mut declarations = Vec::new();
        while !self.cur.is_at_end() {
            declarations.push(self.declaration()?);
        }
        Ok(File { declarations })
    }

    fn declaration(&mut self) -> ParseResult<Declaration> {
        match self.cur.peek_kind() {
            Some(TokenKind::FnIntro) => Ok(Declaration::Function(self.fn_decl()?)),
            Some(TokenKind::StructIntro) => Ok(Declaration::Struct(self.struct_decl()?)),
            Some(found) => Err(crate::error::ParseError::UnexpectedToken {
                position: self.cur.position(),
                expected: "'def' or 'struct'",
                found,
            }),
            None => Err(crate::error::ParseError::UnexpectedEof { expected: "'def' or 'struct'" }),
        }
    }

    fn fn_decl(&mut self) -> ParseResult<FunctionDecl> {
        self.cur.expect(TokenKind::FnIntro, "'def'")?;
        let name = self.identifier()?;
        self.cur.expect(TokenKind::LParen, "'('")?;
        let params = self.param_list()?;
        self.cur.expect(TokenKind::RParen, "')'")?;
        self.cur.expect(TokenKind::FnOutro, "':'")?;
        let body = self.expr()?;
        self.cur.expect(TokenKind::StatementEnd, "';'")?;
        Ok(FunctionDecl { name, ty: Type::implicit_any(), params, body })
    }

    fn struct_decl(&mut self) -> ParseResult<StructDecl> {
        self.cur.expect(TokenKind::StructIntro, "'struct'")?;
        let name = self.identifier()?;
        self.cur.expect(TokenKind::LBrace, "'{'")?;

        let mut attributes = Vec::new();
        while let Some(TokenKind::Ident) = self.cur.peek_kind() {
            let attr_name = self.identifier()?;
            self.cur.expect(TokenKind::TypeSep, "'::'")?;
            let ty = self.ty()?;
            attributes.push(AttributeDecl { name: attr_name, ty });

            if !self.cur.eat(TokenKind::Comma) {
                break;
            }
        }

        self.cur.expect(TokenKind::RBrace, "'}'")?;
        Ok(StructDecl { name, attributes })
    }

    /// `ident (',' ident)* ','?` — permissive: trailing commas and empty
    /// lists are both legal (§4.3 "Function-call parsing", §9 "Open
    /// questions").
    fn param_list(&mut self) -> ParseResult<Vec<Identifier>> {
        let mut params = Vec::new();
        while let Some(TokenKind::Ident) = self.cur.peek_kind() {
            params.push(self.identifier()?);
            if !self.cur.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(params)
    }

    /// `type := basic ('[' list(type, ',') ']')? ('->' type)*` (§3
    /// SPEC_FULL "Type grammar"). The `->` loop chains left-associatively:
    /// `a -> b -> c` builds `Function(Function(a, b), c)`.
    fn ty(&mut self) -> ParseResult<Type> {
        let base = self.identifier()?;
        let mut result = Type::Basic(base.clone());

        if self.cur.eat(TokenKind::LBracket) {
            let mut args = Vec::new();
            if self.cur.peek_kind() != Some(TokenKind::RBracket) {
                loop {
                    args.push(self.ty()?);
                    if !self.cur.eat(TokenKind::Comma) {
                        break;
                    }
                    if self.cur.peek_kind() == Some(TokenKind::RBracket) {
                        break;
                    }
                }
            }
            self.cur.expect(TokenKind::RBracket, "']'")?;
            result = Type::Evaluated { base, args };
        }

        while self.cur.eat(TokenKind::Arrow) {
            let to = self.ty()?;
            result = Type::Function { from: Box::new(result), to: Box::new(to) };
        }

        Ok(result)
    }

    /// `expr ::= block | add_sub`.
    fn expr(&mut self) -> ParseResult<Expression> {
        if self.cur.peek_kind() == Some(TokenKind::LBrace) {
            self.block()
        } else {
            self.add_sub()
        }
    }

    /// `block ::= '{' valdecl* return_stmt '}'`.
    fn block(&mut self) -> ParseResult<Expression> {
        self.cur.expect(TokenKind::LBrace, "'{'")?;

        let mut bindings = Vec::new();
        while self.cur.peek_kind() == Some(TokenKind::ValDefIntro) {
            bindings.push(self.valdecl()?);
        }

        self.cur.expect(TokenKind::Return, "'return'")?;
        let result = self.expr()?;
        self.cur.expect(TokenKind::StatementEnd, "';'")?;
        self.cur.expect(TokenKind::RBrace, "'}'")?;

        Ok(Expression::Block { bindings, result: Box::new(result) })
    }

    /// `valdecl ::= 'let' ident '=' expr ';'`.
    fn valdecl(&mut self) -> ParseResult<Binding> {
        self.cur.expect(TokenKind::ValDefIntro, "'let'")?;
        let name = self.identifier()?;
        self.cur.expect(TokenKind::ValDefOutro, "'='")?;
        let value = self.expr()?;
        self.cur.expect(TokenKind::StatementEnd, "';'")?;
        Ok(Binding { name, value })
    }

    /// `add_sub ::= mul_div (('+'|'-') add_sub)?`, re-associated left: a
    /// `while` loop over same-precedence operators rather than the
    /// grammar's literal right-recursion (§4.3 "Operator associativity").
    fn add_sub(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.mul_div()?;
        loop {
            match self.cur.peek_kind() {
                Some(TokenKind::Plus) | Some(TokenKind::Minus) => {
                    let op = self.cur.bump().unwrap();
                    let op_text = self.cur.store().text(op);
                    let rhs = self.mul_div()?;
                    lhs = Expression::Call {
                        callee: Box::new(Expression::Identifier(Identifier(op_text.to_string()))),
                        args: vec![lhs, rhs],
                    };
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    /// `mul_div ::= call (('*'|'/') mul_div)?`, same left-associating loop
    /// as `add_sub`.
    fn mul_div(&mut self) -> ParseResult<Expression> {
        let mut lhs = self.call()?;
        loop {
            match self.cur.peek_kind() {
                Some(TokenKind::Mult) | Some(TokenKind::Div) => {
                    let op = self.cur.bump().unwrap();
                    let op_text = self.cur.store().text(op);
                    let rhs = self.call()?;
                    lhs = Expression::Call {
                        callee: Box::new(Expression::Identifier(Identifier(op_text.to_string()))),
                        args: vec![lhs, rhs],
                    };
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    /// `call ::= primary ('(' (expr (',' expr)*)? ')')*`. Left-associative:
    /// `f(x)(y)` is a call whose callee is itself a call.
    fn call(&mut self) -> ParseResult<Expression> {
        let mut result = self.primary()?;

        while self.cur.eat(TokenKind::LParen) {
            let mut args = Vec::new();
            if self.cur.peek_kind() != Some(TokenKind::RParen) {
                loop {
                    args.push(self.expr()?);
                    if !self.cur.eat(TokenKind::Comma) {
                        break;
                    }
                    if self.cur.peek_kind() == Some(TokenKind::RParen) {
                        break;
                    }
                }
            }
            self.cur.expect(TokenKind::RParen, "')'")?;
            result = Expression::Call { callee: Box::new(result), args };
        }

        Ok(result)
    }

    /// `primary ::= '(' expr ')' | int_lit | real_lit | string_lit | ident
    /// | lambda`.
    fn primary(&mut self) -> ParseResult<Expression> {
        match self.cur.peek_kind() {
            Some(TokenKind::LParen) => {
                self.cur.bump();
                let inner = self.expr()?;
                self.cur.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            Some(TokenKind::IntLit) => {
                let handle = self.cur.bump().unwrap();
                let text = self.cur.store().text(handle);
                let value: i64 = text.parse().map_err(|_| crate::error::ParseError::InvalidIntLit { slice: text.to_string() })?;
                Ok(Expression::IntLit(value))
            }
            Some(TokenKind::RealLit) => {
                let handle = self.cur.bump().unwrap();
                let value = parse_real_literal(self.cur.store().text(handle))?;
                Ok(Expression::RealLit(value))
            }
            Some(TokenKind::StringLit) => {
                let handle = self.cur.bump().unwrap();
                Ok(Expression::StringLit(unescape_string(self.cur.store().text(handle))))
            }
            Some(TokenKind::Ident) => Ok(Expression::Identifier(self.identifier()?)),
            Some(TokenKind::Backslash) => self.lambda(),
            Some(found) => Err(crate::error::ParseError::UnexpectedToken {
                position: self.cur.position(),
                expected: "an expression",
                found,
            }),
            None => Err(crate::error::ParseError::UnexpectedEof { expected: "an expression" }),
        }
    }

    /// `lambda ::= '\' '(' (ident (',' ident)*)? ')' '->' expr`.
    fn lambda(&mut self) -> ParseResult<Expression> {
        self.cur.expect(TokenKind::Backslash, "'\\\\'")?;
        self.cur.expect(TokenKind::LParen, "'('")?;
        let params = self.param_list()?;
        self.cur.expect(TokenKind::RParen, "')'")?;
        self.cur.expect(TokenKind::Arrow, "'->'")?;
        let body = self.expr()?;
        Ok(Expression::Lambda { params, body: Box::new(body) })
    }

    fn identifier(&mut self) -> ParseResult<Identifier> {
        let text = self.cur.expect_text(TokenKind::Ident, "an identifier")?;
        Ok(Identifier(text.to_string()))
    }
}

/// `d+`, `d+.d*`, `.d*` — the forms the scanner's numeric-combining rules
/// emit (§4.4 "Numeric semantics"); `parse::<f64>()` accepts all three
/// directly except the bare `.` the scanner allows (§8 "Numeric
/// combining": `"."` scans as a single real literal).
fn parse_real_literal(text: &str) -> ParseResult<f64> {
    let normalized = if text == "." {
        "0.0".to_string()
    } else if let Some(rest) = text.strip_prefix('.') {
        format!("0.{rest}")
    } else if text.ends_with('.') {
        format!("{text}0")
    } else {
        text.to_string()
    };

    normalized.parse().map_err(|_| crate::error::ParseError::InvalidRealLit { slice: text.to_string() })
}

/// Unescapes `\\`, `\"`, `\n`, `\t`, `\r` inside a scanned string literal's
/// slice (which still includes both surrounding quotes).
fn unescape_string(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use flc_lex::{scan, strip_whitespace};

    fn build(input: &str) -> File {
        let store = TokensStore::build(input.as_bytes(), strip_whitespace(scan(input.as_bytes())));
        parse_file(&store).unwrap()
    }

    #[test]
    fn simple_function_parses() {
        let file = build("def Main(): { return 2 + 3 * 4; };");
        assert_eq!(file.declarations.len(), 1);
        match &file.declarations[0] {
            Declaration::Function(f) => assert_eq!(f.name.as_str(), "Main"),
            _ => panic!("expected a function declaration"),
        }
    }

    /// Unwraps a function body down to its `result` expression, accepting
    /// either a bare `add_sub` body or a block's final `return` value.
    fn result_of(body: &Expression) -> &Expression {
        match body {
            Expression::Block { result, .. } => result.as_ref(),
            other => other,
        }
    }

    #[test]
    fn left_associative_subtraction() {
        let file = build("def f(): { return a - b - c; };");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        match result_of(&f.body) {
            Expression::Call { callee, args } => {
                assert_eq!(callee_name(callee), "-");
                // outer call's first arg is itself `a - b`
                match &args[0] {
                    Expression::Call { callee, .. } => assert_eq!(callee_name(callee), "-"),
                    other => panic!("expected nested call, got {other:?}"),
                }
            }
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let file = build("def f(): { return a + b * c; };");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        match result_of(&f.body) {
            Expression::Call { callee, args } => {
                assert_eq!(callee_name(callee), "+");
                match &args[1] {
                    Expression::Call { callee, .. } => assert_eq!(callee_name(callee), "*"),
                    other => panic!("expected `b * c` nested, got {other:?}"),
                }
            }
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn nested_calls_left_associate() {
        let file = build("def f(): { return g(x)(y); };");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        match result_of(&f.body) {
            Expression::Call { callee, args } => {
                assert_eq!(args.len(), 1);
                match callee.as_ref() {
                    Expression::Call { .. } => {}
                    other => panic!("expected callee to be a nested call, got {other:?}"),
                }
            }
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn trailing_commas_are_legal() {
        build("def f(a, b,): { return a; };");
    }

    #[test]
    fn empty_param_list_is_legal() {
        build("def f(): { return 1; };");
    }

    #[test]
    fn bare_expression_body_without_a_block_is_legal() {
        let file = build("def f(): 1 + 2;");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        assert!(matches!(f.body, Expression::Call { .. }));
    }

    #[test]
    fn struct_decl_parses_attributes() {
        let file = build("struct Point { x :: Int, y :: Int, }");
        match &file.declarations[0] {
            Declaration::Struct(s) => assert_eq!(s.attributes.len(), 2),
            _ => panic!("expected a struct declaration"),
        }
    }

    #[test]
    fn lambda_parses() {
        let file = build("def f(): { return \\(x, y) -> x + y; };");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        assert!(matches!(result_of(&f.body), Expression::Lambda { .. }));
    }

    #[test]
    fn function_type_arrow_chains_left_associatively() {
        let file = build("struct S { f :: Int -> Int -> Int, }");
        let Declaration::Struct(s) = &file.declarations[0] else { panic!() };
        match &s.attributes[0].ty {
            Type::Function { from, .. } => assert!(matches!(from.as_ref(), Type::Function { .. })),
            other => panic!("expected nested function type, got {other:?}"),
        }
    }

    #[test]
    fn block_with_bindings_parses() {
        let file = build("def f(): { let a = 1; let b = 2; return a + b; };");
        let Declaration::Function(f) = &file.declarations[0] else { panic!() };
        match &f.body {
            Expression::Block { bindings, .. } => assert_eq!(bindings.len(), 2),
            other => panic!("expected a block, got {other:?}"),
        }
    }

    fn callee_name(expr: &Expression) -> &str {
        match expr {
            Expression::Identifier(id) => id.as_str(),
            other => panic!("expected an identifier callee, got {other:?}"),
        }
    }
}

//! AST node definitions (§3 "AST nodes").
//!
//! Every node owns its children outright — strings are copied out of the
//! input slice rather than borrowed, so a `File` can outlive the bytes it
//! was parsed from (§5 "Resources").

/// A bare identifier, e.g. a parameter name or a function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A type expression. The grammar admits these but nothing downstream
/// checks them (§1 "Type-checking is not performed").
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// A bare name, e.g. `Int`.
    Basic(Identifier),
    /// `from -> to`, right-associated into nested nodes by repeated
    /// left-folding (see `ast_parser::parse_type`).
    Function { from: Box<Type>, to: Box<Type> },
    /// `Head[arg, arg, ...]`.
    Evaluated { base: Identifier, args: Vec<Type> },
}

impl Type {
    /// The placeholder every `FunctionDecl::ty` carries, since the `fn_decl`
    /// grammar has no surface syntax that could populate a real one.
    pub fn implicit_any() -> Type {
        Type::Basic(Identifier("Any".to_string()))
    }
}

/// A single `let name = expr;` binding inside a [`Expression::Block`].
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: Identifier,
    pub value: Expression,
}

/// An expression tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    IntLit(i64),
    RealLit(f64),
    StringLit(String),
    Identifier(Identifier),
    /// `callee(args...)`. Left-associative: `f(x)(y)` is a call whose
    /// callee is itself a call.
    Call { callee: Box<Expression>, args: Vec<Expression> },
    /// An anonymous function value. Unlike a `FunctionDecl`, a lambda has
    /// no name and no declared type — it is reachable only through the
    /// AST-builder parser shape (§9 "Open questions").
    Lambda { params: Vec<Identifier>, body: Box<Expression> },
    /// `{ let a = ..; let b = ..; return result; }`. Not part of spec.md's
    /// original six-variant enumeration; added because `expr ::= block |
    /// add_sub` makes blocks a body form every other node here must be
    /// able to represent (see SPEC_FULL.md §3).
    Block { bindings: Vec<Binding>, result: Box<Expression> },
}

/// `def name(params): body;`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: Identifier,
    /// spec.md's concrete `fn_decl` grammar never gives a function a
    /// surface syntax for its declared type (the `:` is followed directly
    /// by the body), yet §3's data model calls for one. Every declaration
    /// carries [`Type::implicit_any`] rather than leaving the field
    /// unreachable from source text.
    pub ty: Type,
    pub params: Vec<Identifier>,
    pub body: Expression,
}

/// One `name :: type` entry inside a `struct` body.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDecl {
    pub name: Identifier,
    pub ty: Type,
}

/// `struct name { attrs... }`. Parsed but never evaluated (§9 "Struct and
/// lambda parsing").
#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: Identifier,
    pub attributes: Vec<AttributeDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(FunctionDecl),
    Struct(StructDecl),
}

/// A whole source file: an ordered list of top-level declarations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct File {
    pub declarations: Vec<Declaration>,
}

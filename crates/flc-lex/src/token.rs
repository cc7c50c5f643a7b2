//! The token catalog (§2 "Token catalog", §3 "Token kind").
//!
//! Every kind is either *literal* (a fixed spelling known at definition time)
//! or *data-bearing* (a slice determined at scan time). `Empty` exists only
//! as the internal placeholder the dispatch table is filled with before
//! every reachable byte gets its real entry — it is never produced by the
//! scanner and `debug_assert!`s if it ever escapes construction.

use static_assertions::const_assert_eq;

/// The closed set of lexical categories this front end recognizes.
///
/// `Backslash`/`Arrow`/`LBracket`/`RBracket`/`StructIntro`/`TypeSep`/
/// `StringLit` extend the restricted core set so lambdas, struct
/// declarations, and the type grammar's evaluated-type/function-type forms
/// are reachable from source text, per the design note that a
/// reimplementation supporting lambdas "must extend both the token catalog
/// and the scanner's dispatch table".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Internal-only placeholder; never produced by the scanner.
    Empty = 0,
    /// An unrecognized byte run, preserved verbatim.
    Invalid,
    /// A maximal run of whitespace bytes.
    Whitespace,

    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    StatementEnd,

    FnIntro,
    FnOutro,
    StructIntro,
    TypeSep,

    ValDefIntro,
    ValDefOutro,

    Ident,
    IntLit,
    RealLit,
    StringLit,

    Plus,
    Minus,
    Mult,
    Div,

    Return,
    Backslash,
    Arrow,
}

pub const TOKEN_KIND_COUNT: usize = 25;
const_assert_eq!(TOKEN_KIND_COUNT, count_variants());

const fn count_variants() -> usize {
    // Kept in lockstep with the enum by hand; the `static_assert` above is
    // the guard against forgetting to update one side (§9 "compile-time
    // token introspection").
    25
}

/// The attribute every token kind carries, per §3 "Token kind".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindAttribute {
    /// Carries a fixed spelling, known without consulting the input.
    Literal(&'static str),
    /// Carries a slice determined at scan time.
    DataBearing,
}

impl TokenKind {
    /// The attribute of this kind, per the token catalog.
    pub const fn attribute(self) -> KindAttribute {
        use KindAttribute::{DataBearing, Literal};
        match self {
            TokenKind::Empty => Literal(""),
            TokenKind::Invalid => DataBearing,
            TokenKind::Whitespace => DataBearing,

            TokenKind::Comma => Literal(","),
            TokenKind::LBrace => Literal("{"),
            TokenKind::RBrace => Literal("}"),
            TokenKind::LParen => Literal("("),
            TokenKind::RParen => Literal(")"),
            TokenKind::LBracket => Literal("["),
            TokenKind::RBracket => Literal("]"),
            TokenKind::StatementEnd => Literal(";"),

            TokenKind::FnIntro => Literal("def"),
            TokenKind::FnOutro => Literal(":"),
            TokenKind::StructIntro => Literal("struct"),
            TokenKind::TypeSep => Literal("::"),

            TokenKind::ValDefIntro => Literal("let"),
            TokenKind::ValDefOutro => Literal("="),

            TokenKind::Ident => DataBearing,
            TokenKind::IntLit => DataBearing,
            TokenKind::RealLit => DataBearing,
            TokenKind::StringLit => DataBearing,

            TokenKind::Plus => Literal("+"),
            TokenKind::Minus => Literal("-"),
            TokenKind::Mult => Literal("*"),
            TokenKind::Div => Literal("/"),

            TokenKind::Return => Literal("return"),
            TokenKind::Backslash => Literal("\\"),
            TokenKind::Arrow => Literal("->"),
        }
    }

    pub const fn has_data(self) -> bool {
        matches!(self.attribute(), KindAttribute::DataBearing)
    }

    pub const fn is_keyword_candidate(self) -> bool {
        matches!(self, TokenKind::FnIntro | TokenKind::ValDefIntro | TokenKind::Return | TokenKind::StructIntro)
    }
}

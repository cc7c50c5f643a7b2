//! The scanner stage: token catalog, dispatch table, and the scanning
//! algorithm that turns a byte slice into an ordered token sequence.

mod dispatch;
mod keyword;
mod scanner;
mod token;

pub use dispatch::{kind_for_leading_byte, DISPATCH_TABLE};
pub use keyword::find_keyword;
pub use scanner::{scan, strip_whitespace, ScannedToken};
pub use token::{KindAttribute, TokenKind, TOKEN_KIND_COUNT};

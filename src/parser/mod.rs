//! Parser for tx3: Logos lexer + recursive-descent parser over rowan.
//!
//! The parser is lossless: every byte of the input, including whitespace and
//! comments, appears in the resulting green tree.

mod lexer;
#[allow(clippy::module_inception)]
mod parser;
mod syntax_kind;

pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken, Tx3Language,
};

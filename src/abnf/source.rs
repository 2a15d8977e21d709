//! Token source for ABNF grammar text
//!
//! Grammar text is cut into tokens by a vanilla logos lexer; the compiler then walks the
//! resulting stream positionally. Trivia (whitespace, comments, line breaks) is kept in the
//! stream because line breaks are significant: a rule's right-hand side ends at a line break
//! unless the next line is indented (a fold).

pub mod stream;
pub mod tokens;

pub use stream::TokenStream;
pub use tokens::{tokenize, Token, TokenKind};

/// Every kind of trivia between rules.
pub const TRIVIA: &[TokenKind] = &[
    TokenKind::Whitespace,
    TokenKind::Comment,
    TokenKind::LineBreak,
];

/// Trivia that may appear inside a single line of a rule.
pub const INLINE_TRIVIA: &[TokenKind] = &[TokenKind::Whitespace, TokenKind::Comment];

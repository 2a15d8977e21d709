//! Error types for grammar compilation and rule lookup
//!
//! Only structural problems are errors. A failed match is not: evaluation always produces a
//! [`Node`](crate::abnf::evaluation::Node) whose outcome records why it failed.

use thiserror::Error;

use crate::abnf::source::TokenKind;

/// A structural error raised while compiling grammar source.
///
/// Compilation stops at the first error and no partially built grammar is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The lexer found text that matches no token pattern.
    #[error("cannot tokenize grammar source at offset {offset}")]
    UnexpectedCharacter { offset: usize },

    /// A specific token kind was required but something else (or nothing) was found.
    #[error("expected {expected:?} at offset {offset}, found {}", describe(.found))]
    Expected {
        expected: TokenKind,
        found: Option<TokenKind>,
        offset: usize,
    },

    /// The source ended where an element was required.
    #[error("unexpected end of grammar source")]
    UnexpectedEof,

    /// An element position holds a token that cannot start an element.
    #[error("unsupported token {kind:?} at offset {offset}")]
    UnsupportedToken { kind: TokenKind, offset: usize },

    /// A numeric literal holds a value outside 0-255, or an inverted range.
    #[error("invalid num-val range in {literal}")]
    InvalidRange { literal: String },

    /// A number does not fit the target integer type.
    #[error("invalid number {text}")]
    InvalidNumber { text: String },
}

fn describe(found: &Option<TokenKind>) -> String {
    match found {
        Some(kind) => format!("{kind:?}"),
        None => "end of input".to_string(),
    }
}

/// Errors raised when looking up rules in a compiled grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("rule not found: {0}")]
    RuleNotFound(String),
}

pub type Result<T, E = CompileError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_error_names_end_of_input() {
        let error = CompileError::Expected {
            expected: TokenKind::RParen,
            found: None,
            offset: 7,
        };
        assert_eq!(
            error.to_string(),
            "expected RParen at offset 7, found end of input"
        );
    }

    #[test]
    fn rule_not_found_message() {
        let error = GrammarError::RuleNotFound("URI".into());
        assert_eq!(error.to_string(), "rule not found: URI");
    }
}

//! Token definitions for ABNF grammar text
//!
//! One variant per pattern of RFC 5234 (plus the RFC 7405 `%i` / `%s` string prefixes).
//! Tokenization is handled entirely by logos.

use std::ops::Range;

use logos::Logos;

use crate::abnf::error::{CompileError, Result};

/// All token kinds of the grammar notation
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Trivia
    #[regex(r"[ \t]+")]
    Whitespace,
    #[regex(r";[^\r\n]*")]
    Comment,
    #[regex(r"\r?\n")]
    LineBreak,

    // Rule definition
    #[regex(r"[A-Za-z][A-Za-z0-9-]*")]
    Ident,
    #[token("=")]
    Equal,

    // Alternation
    #[token("/")]
    Slash,

    // Repetition
    #[token("*")]
    Star,
    #[regex(r"[0-9]+")]
    Number,

    // Group
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Option
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // num-val
    #[regex(r"%[bB][01]+([.-][01]+)*")]
    BinLiteral,
    #[regex(r"%[dD][0-9]+([.-][0-9]+)*")]
    DecLiteral,
    #[regex(r"%[xX][0-9A-Fa-f]+([.-][0-9A-Fa-f]+)*")]
    HexLiteral,

    // char-val
    #[regex(r#""[^"\r\n]*""#)]
    Quoted,
    #[regex(r#"%[iI]"[^"\r\n]*""#)]
    InsensitiveQuoted,
    #[regex(r#"%[sS]"[^"\r\n]*""#)]
    SensitiveQuoted,

    // prose-val
    #[regex(r"<[\x20-\x3D\x3F-\x7E]*>")]
    Prose,
}

impl TokenKind {
    /// Check if this token is whitespace, a comment or a line break
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::LineBreak
        )
    }

    /// Check if this token starts a literal element
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::BinLiteral
                | TokenKind::DecLiteral
                | TokenKind::HexLiteral
                | TokenKind::Quoted
                | TokenKind::InsensitiveQuoted
                | TokenKind::SensitiveQuoted
        )
    }
}

/// A token positioned in the grammar source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span()]
    }
}

/// Tokenize the whole source, failing on the first character no pattern accepts
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                offset: span.start,
                length: span.len(),
            }),
            Err(()) => return Err(CompileError::UnexpectedCharacter { offset: span.start }),
        }
    }

    Ok(tokens)
}

//! Terminal values
//!
//! A literal is an ordered list of character sets, one per matched character. Numeric values
//! (`%b`, `%d`, `%x`) and quoted strings both compile to this form:
//!
//!     %x41-43.61      [{A, B, C}, {a}]
//!     "ab"            [{a, A}, {b, B}]
//!     %s"ab"          [{a}, {b}]

use std::collections::BTreeSet;
use std::fmt;

use crate::abnf::error::{CompileError, Result};
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::Kind;
use crate::abnf::source::{TokenKind, TokenStream};

/// Characters accepted at one position.
pub type CharSet = BTreeSet<char>;

/// Largest value a numeric literal may spell.
const MAX_VALUE: u32 = 0xFF;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    charsets: Vec<CharSet>,
}

impl Literal {
    pub fn new(charsets: Vec<CharSet>) -> Self {
        Self { charsets }
    }

    /// Exactly the characters of `pattern`, case-sensitive.
    pub fn of(pattern: &str) -> Self {
        Self::new(pattern.chars().map(|c| CharSet::from([c])).collect())
    }

    /// The characters of `pattern` in any mixture of upper and lower case.
    pub fn insensitive(pattern: &str) -> Self {
        Self::new(
            pattern
                .chars()
                .map(|c| {
                    let mut charset = CharSet::from([c]);
                    charset.extend(single(c.to_lowercase()));
                    charset.extend(single(c.to_uppercase()));
                    charset
                })
                .collect(),
        )
    }

    pub fn charsets(&self) -> &[CharSet] {
        &self.charsets
    }

    /// Parse any of the six literal token kinds.
    pub fn parse(stream: &mut TokenStream<'_>) -> Result<Self> {
        let kind = stream.peek().map(|token| token.kind);
        match kind {
            Some(TokenKind::BinLiteral) => numeric(stream.consume(TokenKind::BinLiteral)?, 2),
            Some(TokenKind::DecLiteral) => numeric(stream.consume(TokenKind::DecLiteral)?, 10),
            Some(TokenKind::HexLiteral) => numeric(stream.consume(TokenKind::HexLiteral)?, 16),
            Some(TokenKind::Quoted) => {
                let text = stream.consume(TokenKind::Quoted)?;
                Ok(Self::insensitive(unquote(text, 0)))
            }
            Some(TokenKind::InsensitiveQuoted) => {
                let text = stream.consume(TokenKind::InsensitiveQuoted)?;
                Ok(Self::insensitive(unquote(text, 2)))
            }
            Some(TokenKind::SensitiveQuoted) => {
                let text = stream.consume(TokenKind::SensitiveQuoted)?;
                Ok(Self::of(unquote(text, 2)))
            }
            Some(kind) => Err(CompileError::UnsupportedToken {
                kind,
                offset: stream.peek().map_or(0, |token| token.offset),
            }),
            None => Err(CompileError::UnexpectedEof),
        }
    }

    /// Succeeds iff each of the next characters is in the set at its position.
    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let mut characters = cursor.remaining().chars();
        let mut length = 0;

        for charset in &self.charsets {
            match characters.next() {
                Some(c) if charset.contains(&c) => length += c.len_utf8(),
                _ => {
                    return Node::failure(
                        cursor.clone(),
                        Kind::Literal,
                        Reason::LiteralCharsetMismatch,
                        Vec::new(),
                    )
                }
            }
        }

        Node::success(cursor.clone(), Kind::Literal, length, Vec::new())
    }
}

impl fmt::Display for Literal {
    /// Renders each position as a `%x` value or range, or as a bracketed choice when the set
    /// is not contiguous.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.charsets.iter().map(render).collect();
        f.write_str(&positions.join(" "))
    }
}

fn render(charset: &CharSet) -> String {
    let mut runs: Vec<(u32, u32)> = Vec::new();
    for value in charset.iter().map(|&c| u32::from(c)) {
        match runs.last_mut() {
            Some((_, end)) if *end + 1 == value => *end = value,
            _ => runs.push((value, value)),
        }
    }

    let values: Vec<String> = runs
        .iter()
        .map(|&(start, end)| {
            if start == end {
                format!("%x{start:02X}")
            } else {
                format!("%x{start:02X}-{end:02X}")
            }
        })
        .collect();

    match values.len() {
        1 => values.concat(),
        _ => format!("({})", values.join(" / ")),
    }
}

/// A case mapping that yields exactly one character. `ß` uppercases to `SS` and is left alone.
fn single(mut mapping: impl Iterator<Item = char>) -> Option<char> {
    match (mapping.next(), mapping.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// The text between the quotes of a quoted token, skipping a `%i` / `%s` prefix.
fn unquote(text: &str, prefix: usize) -> &str {
    &text[prefix + 1..text.len() - 1]
}

/// `%b` / `%d` / `%x` followed by `.`-separated segments of `start[-end]` values.
fn numeric(text: &str, radix: u32) -> Result<Literal> {
    let invalid_range = || CompileError::InvalidRange {
        literal: text.to_string(),
    };

    text[2..]
        .split('.')
        .map(|segment| {
            let (start, end) = match segment.split_once('-') {
                Some((start, end)) => (value(start, radix)?, value(end, radix)?),
                None => {
                    let value = value(segment, radix)?;
                    (value, value)
                }
            };

            if start > end || end > MAX_VALUE {
                return Err(invalid_range());
            }

            (start..=end)
                .map(|value| char::from_u32(value).ok_or_else(invalid_range))
                .collect::<Result<CharSet>>()
        })
        .collect::<Result<Vec<_>>>()
        .map(Literal::new)
}

fn value(digits: &str, radix: u32) -> Result<u32> {
    u32::from_str_radix(digits, radix).map_err(|_| CompileError::InvalidNumber {
        text: digits.to_string(),
    })
}

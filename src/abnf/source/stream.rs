//! Positional token stream consumed by the grammar compiler

use crate::abnf::error::{CompileError, Result};
use crate::abnf::source::tokens::{tokenize, Token, TokenKind};

/// A forward-only cursor over the tokens of one grammar source.
#[derive(Debug, Clone)]
pub struct TokenStream<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'s> TokenStream<'s> {
    /// Tokenize `source` and position the stream at its first token.
    pub fn new(source: &'s str) -> Result<Self> {
        let tokens = tokenize(source)?;
        Ok(Self::from_tokens(source, tokens))
    }

    /// Build a stream over tokens that were produced elsewhere.
    pub fn from_tokens(source: &'s str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            index: 0,
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Whether any token is left to consume.
    pub fn is_open(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn peek(&self) -> Option<Token> {
        self.tokens.get(self.index).copied()
    }

    /// Look ahead at up to `amount` tokens, ignoring the kinds in `skipping`.
    ///
    /// Nothing is consumed.
    pub fn take(&self, amount: usize, skipping: &[TokenKind]) -> Vec<Token> {
        self.tokens[self.index..]
            .iter()
            .filter(|token| !skipping.contains(&token.kind))
            .take(amount)
            .copied()
            .collect()
    }

    /// Consume tokens while their kind is one of `kinds`.
    pub fn skip(&mut self, kinds: &[TokenKind]) {
        while let Some(token) = self.peek() {
            if !kinds.contains(&token.kind) {
                break;
            }
            self.index += 1;
        }
    }

    /// Consume the next token, which must be of kind `expected`, and return its text.
    pub fn consume(&mut self, expected: TokenKind) -> Result<&'s str> {
        match self.peek() {
            Some(token) if token.kind == expected => {
                self.index += 1;
                Ok(token.text(self.source))
            }
            Some(token) => Err(CompileError::Expected {
                expected,
                found: Some(token.kind),
                offset: token.offset,
            }),
            None => Err(CompileError::Expected {
                expected,
                found: None,
                offset: self.source.len(),
            }),
        }
    }

    /// Whether the next token is of kind `kind`.
    pub fn at(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::source::{INLINE_TRIVIA, TRIVIA};

    #[test]
    fn consume_returns_token_text() {
        let mut stream = TokenStream::new("rule = %x41").unwrap();
        assert_eq!(stream.consume(TokenKind::Ident), Ok("rule"));
        stream.skip(INLINE_TRIVIA);
        assert_eq!(stream.consume(TokenKind::Equal), Ok("="));
        stream.skip(INLINE_TRIVIA);
        assert_eq!(stream.consume(TokenKind::HexLiteral), Ok("%x41"));
        assert!(!stream.is_open());
    }

    #[test]
    fn consume_reports_the_token_found() {
        let mut stream = TokenStream::new("rule").unwrap();
        assert_eq!(
            stream.consume(TokenKind::Equal),
            Err(CompileError::Expected {
                expected: TokenKind::Equal,
                found: Some(TokenKind::Ident),
                offset: 0,
            })
        );
    }

    #[test]
    fn consume_at_end_of_input() {
        let mut stream = TokenStream::new("").unwrap();
        assert_eq!(
            stream.consume(TokenKind::Ident),
            Err(CompileError::Expected {
                expected: TokenKind::Ident,
                found: None,
                offset: 0,
            })
        );
    }

    #[test]
    fn take_looks_ahead_without_consuming() {
        let stream = TokenStream::new(" 2 * 3 x").unwrap();
        let kinds: Vec<_> = stream
            .take(3, &[TokenKind::Whitespace])
            .iter()
            .map(|token| token.kind)
            .collect();
        assert_eq!(kinds, vec![TokenKind::Number, TokenKind::Star, TokenKind::Number]);
        assert_eq!(stream.peek().map(|token| token.kind), Some(TokenKind::Whitespace));
    }

    #[test]
    fn take_stops_at_end_of_input() {
        let stream = TokenStream::new("a").unwrap();
        assert_eq!(stream.take(3, &[]).len(), 1);
    }

    #[test]
    fn skip_consumes_all_trivia() {
        let mut stream = TokenStream::new("  ; comment\r\n\r\n  next").unwrap();
        stream.skip(TRIVIA);
        assert!(stream.at(TokenKind::Ident));
    }
}

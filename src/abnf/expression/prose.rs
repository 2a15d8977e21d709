//! Prose descriptions: `<free text>`
//!
//! Prose is a last resort for rules the notation cannot express; it never matches input.

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::Kind;
use crate::abnf::source::{TokenKind, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prose {
    text: String,
}

impl Prose {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The description without its angle brackets.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parse(stream: &mut TokenStream<'_>) -> Result<Self> {
        let prose = stream.consume(TokenKind::Prose)?;
        Ok(Self::new(&prose[1..prose.len() - 1]))
    }

    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        Node::failure(
            cursor.clone(),
            Kind::Prose,
            Reason::ProseNotEvaluable,
            Vec::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::grammar::RuleSet;
    use crate::abnf::testing::cursor;

    #[test]
    fn strips_angle_brackets() {
        let mut stream = TokenStream::new("<any printable, except greater-than>").unwrap();
        let prose = Prose::parse(&mut stream).unwrap();
        assert_eq!(prose.text(), "any printable, except greater-than");
    }

    #[test]
    fn never_matches() {
        let rules = RuleSet::new();
        let node = Prose::new("anything").evaluate(&cursor("anything", &rules));
        assert_eq!(node.reason(), Some(Reason::ProseNotEvaluable));
        assert!(node.children().is_empty());
    }
}

//! Optional sequences: `[ expression ]`, equivalent to `*1( expression )`

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node};
use crate::abnf::expression::{Expression, Kind, ParseContext};
use crate::abnf::source::{TokenKind, TRIVIA};

/// Named `Optional` so it does not shadow `std::option::Option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optional {
    expression: Box<Expression>,
}

impl Optional {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression: Box::new(expression),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Self> {
        context.stream.consume(TokenKind::LBracket)?;
        let expression = context.parse()?;
        context.stream.skip(TRIVIA);
        context.stream.consume(TokenKind::RBracket)?;
        Ok(Self::new(expression))
    }

    /// Always succeeds; a failed child matches zero characters.
    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let node = self.expression.evaluate(cursor);
        let length = node.length().unwrap_or(0);
        Node::success(cursor.clone(), Kind::Option, length, vec![node])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::evaluation::Reason;
    use crate::abnf::expression::Literal;
    use crate::abnf::grammar::RuleSet;
    use crate::abnf::testing::{cursor, expression};

    #[test]
    fn matches_when_present() {
        let rules = RuleSet::new();
        let option = Optional::new(Expression::Literal(Literal::of("ab")));
        assert_eq!(option.evaluate(&cursor("abc", &rules)).length(), Some(2));
    }

    #[test]
    fn matches_nothing_when_absent() {
        let rules = RuleSet::new();
        let option = Optional::new(Expression::Literal(Literal::of("x")));
        let node = option.evaluate(&cursor("abc", &rules));

        assert_eq!(node.length(), Some(0));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].reason(), Some(Reason::LiteralCharsetMismatch));
    }

    #[test]
    fn parses_a_bracketed_sequence() {
        let parsed = expression("[ \"a\" \"b\" ]");
        let Expression::Option(option) = parsed else {
            panic!("expected option, got {parsed:?}");
        };
        assert_eq!(option.expression().kind(), Kind::Concatenation);
    }
}

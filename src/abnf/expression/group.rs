//! Parenthesized sub-expressions

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::{Expression, Kind, ParseContext};
use crate::abnf::source::{TokenKind, TRIVIA};

/// `( expression )`, evaluated as a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    expression: Box<Expression>,
}

impl Group {
    pub fn new(expression: Expression) -> Self {
        Self {
            expression: Box::new(expression),
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Self> {
        context.stream.consume(TokenKind::LParen)?;
        let expression = context.parse()?;
        context.stream.skip(TRIVIA);
        context.stream.consume(TokenKind::RParen)?;
        Ok(Self::new(expression))
    }

    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let node = self.expression.evaluate(cursor);
        match node.length() {
            Some(length) => Node::success(cursor.clone(), Kind::Group, length, vec![node]),
            None => Node::failure(
                cursor.clone(),
                Kind::Group,
                Reason::GroupExpressionFailed,
                vec![node],
            ),
        }
    }
}

//! Alternatives separated by `/`
//!
//! Branches are tried in order and the first success wins; there is no longest-match search.

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::{Expression, Kind, ParseContext};
use crate::abnf::source::{TokenKind, INLINE_TRIVIA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternation {
    expressions: Vec<Expression>,
}

impl Alternation {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions }
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn into_expressions(self) -> Vec<Expression> {
        self.expressions
    }

    /// `Op ("/" Op)*`, tolerating whitespace and comments around each `/`.
    pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Self> {
        let mut expressions = vec![context.parse()?];

        loop {
            context.stream.skip(INLINE_TRIVIA);
            if !context.stream.at(TokenKind::Slash) {
                break;
            }
            context.stream.consume(TokenKind::Slash)?;
            context.stream.skip(INLINE_TRIVIA);
            expressions.push(context.parse()?);
        }

        Ok(Self::new(expressions))
    }

    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let mut attempts = Vec::with_capacity(self.expressions.len());

        for expression in &self.expressions {
            let node = expression.evaluate(cursor);
            if let Some(length) = node.length() {
                return Node::success(cursor.clone(), Kind::Alternation, length, vec![node]);
            }
            attempts.push(node);
        }

        Node::failure(
            cursor.clone(),
            Kind::Alternation,
            Reason::AlternationNoMatch,
            attempts,
        )
    }

    pub fn simplify(mut self) -> Expression {
        if self.expressions.len() == 1 {
            if let Some(only) = self.expressions.pop() {
                return only.simplify();
            }
        }
        Expression::Alternation(self)
    }
}

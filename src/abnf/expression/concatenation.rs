//! Sequences of elements
//!
//! No whitespace is implied between elements; a grammar that allows it must say so.

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::{Expression, Kind, ParseContext};
use crate::abnf::source::{TokenKind, INLINE_TRIVIA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concatenation {
    expressions: Vec<Expression>,
}

impl Concatenation {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self { expressions }
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// `Op Op*` up to the next `/`, closing bracket, end of input or rule-ending line break.
    ///
    /// A line break followed by whitespace continues the rule on the next line.
    pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Self> {
        let mut expressions = Vec::new();

        loop {
            context.stream.skip(INLINE_TRIVIA);

            let lookahead = context.stream.take(2, &[]);
            let Some(current) = lookahead.first() else {
                break;
            };
            let folded = lookahead
                .get(1)
                .is_some_and(|next| next.kind == TokenKind::Whitespace);

            match current.kind {
                TokenKind::LineBreak if folded => {
                    context.stream.consume(TokenKind::LineBreak)?;
                    context.stream.consume(TokenKind::Whitespace)?;
                }
                TokenKind::LineBreak
                | TokenKind::Slash
                | TokenKind::RParen
                | TokenKind::RBracket => break,
                _ => expressions.push(context.parse()?),
            }
        }

        Ok(Self::new(expressions))
    }

    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let mut children = Vec::with_capacity(self.expressions.len());
        let mut length = 0;

        for expression in &self.expressions {
            let node = expression.evaluate(&cursor.at(cursor.index() + length));
            match node.length() {
                Some(consumed) => {
                    length += consumed;
                    children.push(node);
                }
                None => {
                    return Node::failure(
                        cursor.clone(),
                        Kind::Concatenation,
                        Reason::ConcatenationInvalidSequence,
                        vec![node],
                    );
                }
            }
        }

        Node::success(cursor.clone(), Kind::Concatenation, length, children)
    }

    pub fn simplify(mut self) -> Expression {
        if self.expressions.len() == 1 {
            if let Some(only) = self.expressions.pop() {
                return only.simplify();
            }
        }
        Expression::Concatenation(self)
    }
}

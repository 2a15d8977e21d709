//! References to other rules by name

use tracing::trace;

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::Kind;
use crate::abnf::source::{TokenKind, TokenStream};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    name: String,
}

impl Reference {
    /// A reference to `name`, stored uppercased.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_uppercase(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parse(stream: &mut TokenStream<'_>) -> Result<Self> {
        stream.consume(TokenKind::Ident).map(Self::new)
    }

    /// Evaluate the referenced rule one level deeper in the path.
    ///
    /// A rule that is already being evaluated at the current offset fails instead of recursing,
    /// which makes left recursion terminate.
    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let Some(rule) = cursor.context().rule(&self.name) else {
            return Node::failure(
                cursor.clone(),
                Kind::Reference,
                Reason::ReferenceNotFound,
                Vec::new(),
            );
        };

        if cursor.is_active(rule.name()) {
            return Node::failure(
                cursor.clone(),
                Kind::Reference,
                Reason::ReferenceCyclicRecursion,
                Vec::new(),
            );
        }

        trace!(rule = rule.name(), index = cursor.index(), "entering rule");

        let labeled = cursor.label(rule.name());
        let node = rule.expression().evaluate(&labeled);
        match node.length() {
            Some(length) => Node::success(labeled, Kind::Reference, length, vec![node]),
            None => Node::failure(
                labeled,
                Kind::Reference,
                Reason::ReferenceEvaluationFailed,
                vec![node],
            ),
        }
    }
}

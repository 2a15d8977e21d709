//! Evaluation results
//!
//! A [`Node`] is the outcome of evaluating one expression at one cursor, together with the
//! child evaluations that produced it. Nodes form the parse tree a [`Graph`] is queried over.
//!
//! [`Graph`]: crate::abnf::evaluation::Graph

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::abnf::evaluation::cursor::Cursor;
use crate::abnf::evaluation::path::Path;
use crate::abnf::expression::Kind;

/// Why an evaluation failed. The set is closed; every combinator fails with one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    AlternationNoMatch,
    ConcatenationInvalidSequence,
    LiteralCharsetMismatch,
    RepetitionBelowMinimum,
    RepetitionNoProgress,
    ProseNotEvaluable,
    ReferenceNotFound,
    ReferenceEvaluationFailed,
    ReferenceCyclicRecursion,
    GroupExpressionFailed,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::AlternationNoMatch => "ALTERNATION_NO_MATCH",
            Reason::ConcatenationInvalidSequence => "CONCATENATION_INVALID_SEQUENCE",
            Reason::LiteralCharsetMismatch => "LITERAL_CHARSET_MISMATCH",
            Reason::RepetitionBelowMinimum => "REPETITION_BELOW_MINIMUM",
            Reason::RepetitionNoProgress => "REPETITION_NO_PROGRESS",
            Reason::ProseNotEvaluable => "PROSE_NOT_EVALUABLE",
            Reason::ReferenceNotFound => "REFERENCE_NOT_FOUND",
            Reason::ReferenceEvaluationFailed => "REFERENCE_EVALUATION_FAILED",
            Reason::ReferenceCyclicRecursion => "REFERENCE_CYCLIC_RECURSION",
            Reason::GroupExpressionFailed => "GROUP_EXPRESSION_FAILED",
        }
    }
}

/// Success with a consumed length, or failure with a reason. Never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Outcome {
    Success { length: usize },
    Failure { reason: Reason },
}

/// One evaluation outcome in the parse tree.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    cursor: Cursor<'a>,
    kind: Kind,
    children: Vec<Node<'a>>,
    outcome: Outcome,
}

impl<'a> Node<'a> {
    pub fn new(cursor: Cursor<'a>, kind: Kind, outcome: Outcome, children: Vec<Node<'a>>) -> Self {
        Self {
            cursor,
            kind,
            children,
            outcome,
        }
    }

    pub fn success(cursor: Cursor<'a>, kind: Kind, length: usize, children: Vec<Node<'a>>) -> Self {
        Self::new(cursor, kind, Outcome::Success { length }, children)
    }

    pub fn failure(cursor: Cursor<'a>, kind: Kind, reason: Reason, children: Vec<Node<'a>>) -> Self {
        Self::new(cursor, kind, Outcome::Failure { reason }, children)
    }

    pub fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn children(&self) -> &[Node<'a>] {
        &self.children
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }

    /// Consumed length on success.
    pub fn length(&self) -> Option<usize> {
        match self.outcome {
            Outcome::Success { length } => Some(length),
            Outcome::Failure { .. } => None,
        }
    }

    /// Failure reason on failure.
    pub fn reason(&self) -> Option<Reason> {
        match self.outcome {
            Outcome::Success { .. } => None,
            Outcome::Failure { reason } => Some(reason),
        }
    }

    /// Input offset the evaluation started at.
    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn path(&self) -> &Path<'a> {
        self.cursor.path()
    }

    /// The matched input, or `None` if the evaluation failed.
    pub fn text(&self) -> Option<&'a str> {
        self.length().map(|length| self.cursor.peek(length))
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 6)?;
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("index", &self.index())?;
        state.serialize_field("path", &self.path().segments())?;
        state.serialize_field("outcome", &self.outcome)?;
        state.serialize_field("text", &self.text())?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::evaluation::Context;
    use crate::abnf::grammar::RuleSet;

    #[test]
    fn text_of_success_at_cursor_position() {
        let rules = RuleSet::new();
        let cursor = Cursor::new(
            Context::new("BAR baz", &rules),
            0,
            1,
            Path::from_segments(["FOO"]),
        );
        let node = Node::success(cursor, Kind::Reference, 3, Vec::new());
        assert_eq!(node.text(), Some("BAR"));
    }

    #[test]
    fn text_uses_the_node_cursor_offset() {
        let rules = RuleSet::new();
        let cursor = Cursor::new(Context::new("BAR baz", &rules), 4, 0, Path::new());
        let node = Node::success(cursor, Kind::Literal, 3, Vec::new());
        assert_eq!(node.text(), Some("baz"));
    }

    #[test]
    fn failure_has_no_text_and_no_length() {
        let rules = RuleSet::new();
        let cursor = Cursor::new(Context::new("BAR", &rules), 0, 1, Path::from_segments(["FOO"]));
        let node = Node::failure(cursor, Kind::Reference, Reason::ReferenceNotFound, Vec::new());
        assert_eq!(node.text(), None);
        assert_eq!(node.length(), None);
        assert_eq!(node.reason(), Some(Reason::ReferenceNotFound));
    }

    #[test]
    fn serializes_outcome_and_text() {
        let rules = RuleSet::new();
        let cursor = Cursor::new(Context::new("abc", &rules), 0, 0, Path::from_segments(["A"]));
        let node = Node::success(cursor, Kind::Literal, 2, Vec::new());
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "kind": "LITERAL",
                "index": 0,
                "path": ["A"],
                "outcome": { "type": "success", "length": 2 },
                "text": "ab",
                "children": []
            })
        );
    }
}

//! Node predicates for graph searches

use serde::{Deserialize, Serialize};

use crate::abnf::evaluation::node::Node;
use crate::abnf::evaluation::path::same_name;
use crate::abnf::expression::Kind;

/// Up to three criteria a node must all satisfy. An empty query matches every node.
///
/// Queries deserialize from `{"kind": "REFERENCE", "path": ["URI", "HOST"], "name": "host"}`
/// with every field optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Query {
    /// Expression kind that produced the node.
    pub kind: Option<Kind>,
    /// Full rule path of the node, root first.
    pub path: Option<Vec<String>>,
    /// Last segment of the node's rule path.
    pub name: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether `node` satisfies every criterion present.
    pub fn matches(&self, node: &Node<'_>) -> bool {
        let path = node.path();
        self.kind.map_or(true, |kind| node.kind() == kind)
            && self.path.as_ref().map_or(true, |segments| path.matches(segments.as_slice()))
            && self.name.as_ref().map_or(true, |name| {
                path.tail().is_some_and(|tail| same_name(tail, name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::evaluation::{Context, Cursor, Path};
    use crate::abnf::grammar::RuleSet;

    fn node<'a>(rules: &'a RuleSet, kind: Kind, path: Path<'a>) -> Node<'a> {
        let cursor = Cursor::new(Context::new("BAR", rules), 0, 1, path);
        Node::success(cursor, kind, 3, Vec::new())
    }

    #[test]
    fn matches_equal_path() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Reference, Path::from_segments(["A", "B", "C"]));
        assert!(Query::new().with_path(["A", "B", "C"]).matches(&node));
    }

    #[test]
    fn matches_path_in_other_casing() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Reference, Path::from_segments(["A", "B", "C"]));
        assert!(Query::new().with_path(["a", "b", "c"]).matches(&node));
    }

    #[test]
    fn does_not_match_longer_path() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Reference, Path::from_segments(["A", "B", "C"]));
        assert!(!Query::new().with_path(["A", "B", "C", "D"]).matches(&node));
    }

    #[test]
    fn matches_tail_name() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Reference, Path::from_segments(["A", "B", "C"]));
        assert!(Query::new().with_name("C").matches(&node));
        assert!(Query::new().with_name("c").matches(&node));
        assert!(!Query::new().with_name("B").matches(&node));
    }

    #[test]
    fn does_not_match_name_that_is_not_the_tail() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Reference, Path::from_segments(["A", "B", "C", "D"]));
        assert!(!Query::new().with_name("C").matches(&node));
    }

    #[test]
    fn matches_kind() {
        let rules = RuleSet::new();
        let reference = node(&rules, Kind::Reference, Path::new());
        let prose = node(&rules, Kind::Prose, Path::new());
        let query = Query::new().with_kind(Kind::Reference);
        assert!(query.matches(&reference));
        assert!(!query.matches(&prose));
    }

    #[test]
    fn name_never_matches_empty_path() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Literal, Path::new());
        assert!(!Query::new().with_name("A").matches(&node));
    }

    #[test]
    fn empty_query_matches_everything() {
        let rules = RuleSet::new();
        let node = node(&rules, Kind::Prose, Path::new());
        assert!(Query::new().matches(&node));
    }

    #[test]
    fn deserializes_from_json() {
        let query: Query =
            serde_json::from_str(r#"{"kind": "REFERENCE", "name": "host"}"#).unwrap();
        assert_eq!(query, Query::new().with_kind(Kind::Reference).with_name("host"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<Query>(r#"{"type": "REFERENCE"}"#);
        assert!(result.is_err());
    }
}

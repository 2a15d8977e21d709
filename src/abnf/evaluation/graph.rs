//! Queryable parse trees

use crate::abnf::evaluation::node::Node;
use crate::abnf::evaluation::query::Query;

/// A parse tree root answering depth-first queries.
///
/// Any node of a tree can seed its own graph, scoping later queries to that sub-match.
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    root: Node<'a>,
}

impl<'a> Graph<'a> {
    pub fn new(root: Node<'a>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node<'a> {
        &self.root
    }

    pub fn into_root(self) -> Node<'a> {
        self.root
    }

    /// Every node matching `query`, in pre-order.
    ///
    /// Children are searched whether or not their parent matched.
    pub fn filter(&self, query: &Query) -> Vec<&Node<'a>> {
        let mut matches = Vec::new();
        collect(&self.root, query, &mut matches);
        matches
    }

    /// The first node `filter` would return.
    pub fn find(&self, query: &Query) -> Option<&Node<'a>> {
        first(&self.root, query)
    }
}

impl<'a> From<Node<'a>> for Graph<'a> {
    fn from(root: Node<'a>) -> Self {
        Self::new(root)
    }
}

fn collect<'g, 'a>(node: &'g Node<'a>, query: &Query, matches: &mut Vec<&'g Node<'a>>) {
    if query.matches(node) {
        matches.push(node);
    }
    for child in node.children() {
        collect(child, query, matches);
    }
}

fn first<'g, 'a>(node: &'g Node<'a>, query: &Query) -> Option<&'g Node<'a>> {
    if query.matches(node) {
        return Some(node);
    }
    node.children().iter().find_map(|child| first(child, query))
}

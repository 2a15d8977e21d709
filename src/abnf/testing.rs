//! Testing utilities for grammars and parse trees
//!
//! Build fixtures with [`grammar`], [`expression`] and [`cursor`], then verify evaluation
//! results with the fluent [`assert_node`] API:
//!
//! ```rust-example
//! let grammar = grammar("pair = a \",\" a\na = 1*DIGIT\n");
//! let node = grammar.rule("pair").unwrap().evaluate("12,3");
//!
//! assert_node(&node)
//!     .succeeds_with("12,3")
//!     .kind(Kind::Concatenation)
//!     .child_count(3)
//!     .child(2, |child| {
//!         child.kind(Kind::Reference).name("a").succeeds_with("3");
//!     });
//! ```
//!
//! Grammars built by [`grammar`] sit on top of the core rules and are compiled leniently, so
//! fixtures can use `\n` line endings.

use crate::abnf::evaluation::{Context, Cursor, Node, Path, Reason};
use crate::abnf::expression::{self, Expression, Kind};
use crate::abnf::grammar::{Grammar, Mode, RuleSet};
use crate::abnf::source::TokenStream;

/// Compile `source` over the core rules, panicking on compile errors.
pub fn grammar(source: &str) -> Grammar {
    Grammar::core()
        .and_then(|core| core.extend(Mode::Lenient, source))
        .unwrap_or_else(|error| panic!("grammar failed to compile: {error}\n{source}"))
}

/// Parse a single right-hand side, panicking on compile errors.
pub fn expression(source: &str) -> Expression {
    TokenStream::new(source)
        .and_then(|mut stream| expression::parse(&mut stream))
        .unwrap_or_else(|error| panic!("expression failed to parse: {error}\n{source}"))
}

/// A cursor at the start of `input` with an empty path.
pub fn cursor<'a>(input: &'a str, rules: &'a RuleSet) -> Cursor<'a> {
    Cursor::new(Context::new(input, rules), 0, 0, Path::new())
}

pub fn assert_node<'n, 'a>(node: &'n Node<'a>) -> NodeAssertion<'n, 'a> {
    NodeAssertion {
        node,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'n, 'a> {
    node: &'n Node<'a>,
    context: String,
}

impl<'n, 'a> NodeAssertion<'n, 'a> {
    pub fn succeeds_with(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text(),
            Some(expected),
            "{}: Expected success matching {:?}, but got {:?}",
            self.context,
            expected,
            self.node.outcome()
        );
        self
    }

    pub fn fails_with(self, expected: Reason) -> Self {
        assert_eq!(
            self.node.reason(),
            Some(expected),
            "{}: Expected failure {:?}, but got {:?}",
            self.context,
            expected,
            self.node.outcome()
        );
        self
    }

    pub fn kind(self, expected: Kind) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: Expected kind {}, but got {}",
            self.context,
            expected,
            self.node.kind()
        );
        self
    }

    pub fn at(self, expected: usize) -> Self {
        assert_eq!(
            self.node.index(),
            expected,
            "{}: Expected node at offset {}, but got {}",
            self.context,
            expected,
            self.node.index()
        );
        self
    }

    /// The last path segment, compared case-insensitively.
    pub fn name(self, expected: &str) -> Self {
        let actual = self.node.path().tail();
        assert!(
            actual.is_some_and(|tail| tail.eq_ignore_ascii_case(expected)),
            "{}: Expected path to end in '{}', but got {}",
            self.context,
            expected,
            self.node.path()
        );
        self
    }

    pub fn path(self, expected: &[&str]) -> Self {
        assert!(
            self.node.path().matches(expected),
            "{}: Expected path {:?}, but got {}",
            self.context,
            expected,
            self.node.path()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.node.children().len();
        assert_eq!(
            actual, expected,
            "{}: Expected {} children, but got {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'n, 'a>),
    {
        let child = self.node.children().get(index).unwrap_or_else(|| {
            panic!(
                "{}: Child index {} out of bounds ({} children)",
                self.context,
                index,
                self.node.children().len()
            )
        });
        assertion(NodeAssertion {
            node: child,
            context: format!("{}.children[{}]", self.context, index),
        });
        self
    }
}

//! Positional evaluation state

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use crate::abnf::evaluation::context::Context;
use crate::abnf::evaluation::path::Path;

/// Rule names being evaluated, keyed by the input offset they started at.
type ActiveNames<'a> = Arc<HashMap<usize, Arc<HashSet<&'a str>>>>;

/// An immutable snapshot of where evaluation stands.
///
/// `active` exists only for cycle detection: a rule may recurse at a different input offset
/// but never at the offset it is already being evaluated at.
#[derive(Clone)]
pub struct Cursor<'a> {
    context: Context<'a>,
    index: usize,
    depth: usize,
    path: Path<'a>,
    active: ActiveNames<'a>,
}

impl<'a> Cursor<'a> {
    /// The cursor a top-level evaluation of rule `name` starts from.
    pub fn init(name: &'a str, context: Context<'a>) -> Self {
        Self::new(context, 0, 0, Path::new().fork(name))
    }

    /// A cursor with no active rule names.
    pub fn new(context: Context<'a>, index: usize, depth: usize, path: Path<'a>) -> Self {
        Self {
            context,
            index,
            depth,
            path,
            active: Arc::default(),
        }
    }

    pub fn context(&self) -> Context<'a> {
        self.context
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn path(&self) -> &Path<'a> {
        &self.path
    }

    /// The same cursor moved to `index`.
    pub fn at(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }

    /// A cursor one rule deeper: `name` is appended to the path and marked active at the
    /// current index.
    pub fn label(&self, name: &'a str) -> Self {
        let mut names = self
            .active
            .get(&self.index)
            .map(|names| names.as_ref().clone())
            .unwrap_or_default();
        names.insert(name);

        let mut active = self.active.as_ref().clone();
        active.insert(self.index, Arc::new(names));

        Self {
            context: self.context,
            index: self.index,
            depth: self.depth + 1,
            path: self.path.fork(name),
            active: Arc::new(active),
        }
    }

    /// Whether rule `name` is already being evaluated at the current index.
    pub fn is_active(&self, name: &str) -> bool {
        self.active
            .get(&self.index)
            .is_some_and(|names| names.contains(name))
    }

    /// The input window of `length` bytes at the current index.
    pub fn peek(&self, length: usize) -> &'a str {
        self.context.peek(self.index, length)
    }

    /// All input from the current index on.
    pub fn remaining(&self) -> &'a str {
        self.context.input().get(self.index..).unwrap_or("")
    }
}

impl fmt::Debug for Cursor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("depth", &self.depth)
            .field("path", &self.path)
            .finish()
    }
}

//! Rule-name breadcrumbs
//!
//! A path records which named rules were entered to reach an evaluation point. Paths are
//! persistent linked stacks: forking appends one segment and shares everything before it.

use std::fmt;
use std::sync::Arc;

struct Segment<'a> {
    name: &'a str,
    parent: Option<Arc<Segment<'a>>>,
}

/// An immutable stack of rule names.
#[derive(Clone, Default)]
pub struct Path<'a> {
    head: Option<Arc<Segment<'a>>>,
    len: usize,
}

impl<'a> Path<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path from its segments, root first.
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .fold(Self::new(), |path, name| path.fork(name))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The last segment, if any.
    pub fn tail(&self) -> Option<&'a str> {
        self.head.as_ref().map(|segment| segment.name)
    }

    /// A new path with `name` appended.
    pub fn fork(&self, name: &'a str) -> Self {
        Self {
            head: Some(Arc::new(Segment {
                name,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Segments from the tail back to the root.
    pub fn iter_from_tail(&self) -> impl Iterator<Item = &'a str> + '_ {
        std::iter::successors(self.head.as_deref(), |segment| segment.parent.as_deref())
            .map(|segment| segment.name)
    }

    /// Segments in order, root first.
    pub fn segments(&self) -> Vec<&'a str> {
        let mut segments: Vec<_> = self.iter_from_tail().collect();
        segments.reverse();
        segments
    }

    /// Whether this path equals `segments`, comparing names case-insensitively.
    pub fn matches<S: AsRef<str>>(&self, segments: &[S]) -> bool {
        self.len == segments.len()
            && self
                .iter_from_tail()
                .zip(segments.iter().rev())
                .all(|(name, other)| same_name(name, other.as_ref()))
    }

    /// Whether both paths hold the same names in the same order, ignoring case.
    pub fn matches_path(&self, other: &Path<'_>) -> bool {
        self.len == other.len
            && self
                .iter_from_tail()
                .zip(other.iter_from_tail())
                .all(|(name, other)| same_name(name, other))
    }
}

/// Case-insensitive rule-name comparison.
pub(crate) fn same_name(left: &str, right: &str) -> bool {
    left.chars()
        .flat_map(char::to_uppercase)
        .eq(right.chars().flat_map(char::to_uppercase))
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str("=>")?;
            }
            write!(f, "{}", segment.to_uppercase())?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.segments()).finish()
    }
}

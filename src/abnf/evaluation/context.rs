//! Per-evaluation input and rule set

use std::fmt;

use crate::abnf::grammar::{Rule, RuleSet};

/// The input string and the rules one top-level evaluation runs against.
///
/// Both are borrowed, so a context is a cheap `Copy` value carried by every cursor.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    input: &'a str,
    rules: &'a RuleSet,
}

impl<'a> Context<'a> {
    pub fn new(input: &'a str, rules: &'a RuleSet) -> Self {
        Self { input, rules }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// Look up a rule by its uppercased name.
    pub fn rule(&self, name: &str) -> Option<&'a Rule> {
        self.rules.get(name)
    }

    /// The input window of `length` bytes starting at `index`, clamped to the input.
    pub fn peek(&self, index: usize, length: usize) -> &'a str {
        let end = index.saturating_add(length).min(self.input.len());
        self.input.get(index.min(end)..end).unwrap_or("")
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("input", &self.input)
            .field("rules", &self.rules.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_returns_window_at_position() {
        let rules = RuleSet::new();
        let context = Context::new("ABCDEF", &rules);
        assert_eq!(context.peek(1, 2), "BC");
    }

    #[test]
    fn peek_is_clamped_to_the_input() {
        let rules = RuleSet::new();
        let context = Context::new("ABC", &rules);
        assert_eq!(context.peek(2, 5), "C");
        assert_eq!(context.peek(7, 1), "");
    }
}

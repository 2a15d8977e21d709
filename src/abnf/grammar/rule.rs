//! Named rules
//!
//! A [`Rule`] only owns its expression. References between rules are resolved by name at
//! evaluation time, so evaluating a rule needs the [`RuleSet`] it belongs to; [`BoundRule`]
//! carries both and is what [`Grammar::rule`](crate::abnf::grammar::Grammar::rule) hands out.

use tracing::{debug, trace};

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Context, Cursor, Graph, Node};
use crate::abnf::expression::{self, Expression};
use crate::abnf::grammar::RuleSet;
use crate::abnf::source::{TokenKind, TokenStream, TRIVIA};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    expression: Expression,
}

impl Rule {
    /// A rule named `name`, stored uppercased.
    pub fn new(name: &str, expression: Expression) -> Self {
        Self {
            name: name.to_uppercase(),
            expression,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// Parse one `name = elements` definition.
    ///
    /// A name already in `rules` is not redefined: the new elements are merged into the
    /// existing rule as further alternatives, whether the assignment is `=` or `=/`.
    pub fn parse(rules: &RuleSet, stream: &mut TokenStream<'_>) -> Result<Self> {
        let name = stream.consume(TokenKind::Ident)?.to_uppercase();
        stream.skip(TRIVIA);
        stream.consume(TokenKind::Equal)?;
        expression::skip_incremental_marker(stream)?;

        let expression = match rules.get(&name) {
            Some(existing) => {
                debug!(rule = %name, "merging alternatives into existing rule");
                expression::extend(stream, existing.expression.clone())?
            }
            None => expression::parse(stream)?,
        };
        trace!(rule = %name, kind = %expression.kind(), "compiled rule");

        stream.skip(TRIVIA);
        Ok(Self { name, expression })
    }

    /// Evaluate this rule against `input`, resolving references through `rules`.
    pub fn evaluate_in<'a>(&'a self, rules: &'a RuleSet, input: &'a str) -> Node<'a> {
        let cursor = Cursor::init(&self.name, Context::new(input, rules));
        self.expression.evaluate(&cursor)
    }

    pub fn graph_in<'a>(&'a self, rules: &'a RuleSet, input: &'a str) -> Graph<'a> {
        Graph::new(self.evaluate_in(rules, input))
    }
}

/// A rule together with the rule set its references resolve against.
#[derive(Debug, Clone, Copy)]
pub struct BoundRule<'g> {
    rule: &'g Rule,
    rules: &'g RuleSet,
}

impl<'g> BoundRule<'g> {
    pub fn new(rule: &'g Rule, rules: &'g RuleSet) -> Self {
        Self { rule, rules }
    }

    pub fn rule(&self) -> &'g Rule {
        self.rule
    }

    pub fn name(&self) -> &'g str {
        self.rule.name()
    }

    pub fn expression(&self) -> &'g Expression {
        self.rule.expression()
    }

    /// Evaluate `input` from its start. The match need not cover the whole input.
    pub fn evaluate<'a>(&self, input: &'a str) -> Node<'a>
    where
        'g: 'a,
    {
        self.rule.evaluate_in(self.rules, input)
    }

    pub fn graph<'a>(&self, input: &'a str) -> Graph<'a>
    where
        'g: 'a,
    {
        Graph::new(self.evaluate(input))
    }
}

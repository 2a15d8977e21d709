//! Repeated elements: `<min>*<max>element`
//!
//! Every element passes through this level, so plain elements parse as `1*1` repetitions and
//! are unwrapped again by simplification.

use std::fmt;

use crate::abnf::error::{CompileError, Result};
use crate::abnf::evaluation::{Cursor, Node, Reason};
use crate::abnf::expression::{Expression, Kind, ParseContext};
use crate::abnf::source::TokenKind;

const WHITESPACE: &[TokenKind] = &[TokenKind::Whitespace];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repetition {
    expression: Box<Expression>,
    min: usize,
    /// `None` is unbounded.
    max: Option<usize>,
}

impl Repetition {
    pub fn new(expression: Expression, min: usize, max: Option<usize>) -> Self {
        Self {
            expression: Box::new(expression),
            min,
            max,
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Parse an optional `n*m`, `n*`, `n`, `*m` or `*` prefix and the element it applies to.
    pub fn parse(context: &mut ParseContext<'_, '_>) -> Result<Self> {
        context.stream.skip(WHITESPACE);

        let kinds: Vec<TokenKind> = context
            .stream
            .take(3, WHITESPACE)
            .into_iter()
            .map(|token| token.kind)
            .collect();
        let prefix = Prefix::detect(&kinds);

        let min = match prefix {
            Prefix::Between | Prefix::AtLeast | Prefix::Exactly => {
                let min = number(context.stream.consume(TokenKind::Number)?)?;
                context.stream.skip(WHITESPACE);
                min
            }
            Prefix::AtMost | Prefix::Any => 0,
            Prefix::None => 1,
        };

        if prefix.has_star() {
            context.stream.consume(TokenKind::Star)?;
            context.stream.skip(WHITESPACE);
        }

        let max = match prefix {
            Prefix::Between | Prefix::AtMost => {
                Some(number(context.stream.consume(TokenKind::Number)?)?)
            }
            Prefix::AtLeast | Prefix::Any => None,
            Prefix::Exactly => Some(min),
            Prefix::None => Some(1),
        };

        let expression = context.parse()?;
        Ok(Self::new(expression, min, max))
    }

    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        let mut accepted: Vec<Node<'a>> = Vec::new();
        let mut length = 0;

        while self.max.map_or(true, |max| accepted.len() < max) {
            let node = self.expression.evaluate(&cursor.at(cursor.index() + length));
            let count = accepted.len();

            match node.length() {
                None if count < self.min => {
                    return Node::failure(
                        cursor.clone(),
                        Kind::Repetition,
                        Reason::RepetitionBelowMinimum,
                        vec![node],
                    );
                }
                None => break,
                Some(0) if count < self.min => {
                    return Node::failure(
                        cursor.clone(),
                        Kind::Repetition,
                        Reason::RepetitionNoProgress,
                        Vec::new(),
                    );
                }
                Some(0) => {
                    accepted.push(node);
                    break;
                }
                Some(consumed) => {
                    length += consumed;
                    accepted.push(node);
                }
            }
        }

        // A maximum below the minimum ends the loop early.
        if accepted.len() < self.min {
            return Node::failure(
                cursor.clone(),
                Kind::Repetition,
                Reason::RepetitionBelowMinimum,
                Vec::new(),
            );
        }

        Node::success(cursor.clone(), Kind::Repetition, length, accepted)
    }

    pub fn simplify(self) -> Expression {
        if self.min == 1 && self.max == Some(1) {
            return self.expression.simplify();
        }
        Expression::Repetition(self)
    }
}

impl fmt::Display for Repetition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", self.min)?,
            Some(max) => write!(f, "{}*{}", self.min, max)?,
            None => write!(f, "{}*", self.min)?,
        }
        write!(f, "{}", self.expression)
    }
}

/// Which repetition prefix the next tokens spell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    /// `n*m`
    Between,
    /// `n*`
    AtLeast,
    /// `n`
    Exactly,
    /// `*m`
    AtMost,
    /// `*`
    Any,
    None,
}

impl Prefix {
    fn detect(kinds: &[TokenKind]) -> Self {
        use TokenKind::{Number, Star};

        match kinds {
            [Number, Star, Number, ..] => Prefix::Between,
            [Number, Star, ..] => Prefix::AtLeast,
            [Number, ..] => Prefix::Exactly,
            [Star, Number, ..] => Prefix::AtMost,
            [Star, ..] => Prefix::Any,
            _ => Prefix::None,
        }
    }

    fn has_star(self) -> bool {
        matches!(
            self,
            Prefix::Between | Prefix::AtLeast | Prefix::AtMost | Prefix::Any
        )
    }
}

fn number(text: &str) -> Result<usize> {
    text.parse().map_err(|_| CompileError::InvalidNumber {
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::expression::{Literal, Optional};
    use crate::abnf::grammar::RuleSet;
    use crate::abnf::testing::{cursor, expression};
    use rstest::rstest;

    fn repeat(pattern: &str, min: usize, max: Option<usize>) -> Repetition {
        Repetition::new(Expression::Literal(Literal::of(pattern)), min, max)
    }

    #[rstest]
    #[case("3*5\"a\"", 3, Some(5))]
    #[case("2*\"a\"", 2, None)]
    #[case("4\"a\"", 4, Some(4))]
    #[case("*7\"a\"", 0, Some(7))]
    #[case("*\"a\"", 0, None)]
    #[case("1 * 2 \"a\"", 1, Some(2))]
    fn parses_prefix(#[case] source: &str, #[case] min: usize, #[case] max: Option<usize>) {
        let parsed = expression(source);
        let Expression::Repetition(repetition) = parsed else {
            panic!("expected repetition, got {parsed:?}");
        };
        assert_eq!((repetition.min(), repetition.max()), (min, max));
        assert_eq!(repetition.expression().kind(), Kind::Literal);
    }

    #[test]
    fn no_prefix_is_exactly_once() {
        assert_eq!(expression("1*1\"a\"").kind(), Kind::Literal);
        assert_eq!(expression("1\"a\"").kind(), Kind::Literal);
    }

    #[rstest]
    #[case("aaaa", 0, None, Some(4))]
    #[case("aaaa", 0, Some(2), Some(2))]
    #[case("aab", 2, Some(3), Some(2))]
    #[case("", 0, None, Some(0))]
    #[case("ab", 2, None, None)]
    #[case("aaa", 3, Some(2), None)]
    fn matches_within_bounds(
        #[case] input: &str,
        #[case] min: usize,
        #[case] max: Option<usize>,
        #[case] length: Option<usize>,
    ) {
        let rules = RuleSet::new();
        let node = repeat("a", min, max).evaluate(&cursor(input, &rules));
        assert_eq!(node.length(), length);
    }

    #[test]
    fn below_minimum_keeps_the_failing_attempt() {
        let rules = RuleSet::new();
        let node = repeat("a", 3, None).evaluate(&cursor("aab", &rules));

        assert_eq!(node.reason(), Some(Reason::RepetitionBelowMinimum));
        assert_eq!(node.children().len(), 1);
        assert_eq!(node.children()[0].index(), 2);
    }

    #[test]
    fn maximum_below_minimum_never_matches() {
        let grammar = crate::abnf::testing::grammar("a = 3*2\"x\"\n");
        let node = grammar.rule("a").unwrap().evaluate("xxx");

        assert_eq!(node.reason(), Some(Reason::RepetitionBelowMinimum));
        assert!(node.children().is_empty());
    }

    #[test]
    fn zero_length_before_minimum_is_no_progress() {
        let rules = RuleSet::new();
        let optional = Expression::Option(Optional::new(Expression::Literal(Literal::of("a"))));
        let node = Repetition::new(optional, 2, None).evaluate(&cursor("b", &rules));

        assert_eq!(node.reason(), Some(Reason::RepetitionNoProgress));
        assert!(node.children().is_empty());
    }

    #[test]
    fn zero_length_after_minimum_stops_the_loop() {
        let rules = RuleSet::new();
        let optional = Expression::Option(Optional::new(Expression::Literal(Literal::of("a"))));
        let node = Repetition::new(optional, 1, None).evaluate(&cursor("aab", &rules));

        assert_eq!(node.length(), Some(2));
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.children()[2].length(), Some(0));
    }

    #[test]
    fn displays_its_bounds() {
        assert_eq!(repeat("a", 1, Some(3)).to_string(), "1*3%x61");
        assert_eq!(repeat("a", 2, None).to_string(), "2*%x61");
        assert_eq!(repeat("a", 2, Some(2)).to_string(), "2%x61");
    }
}

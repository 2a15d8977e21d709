//! Grammar expressions
//!
//! The combinator set is closed, so expressions are a single enum and every operation
//! (parsing, evaluation, simplification, query by kind) matches it exhaustively.
//!
//! Parsing
//!
//!     Right-hand sides are parsed by an operator-precedence descent over four levels:
//!
//!         Alternation > Concatenation > Repetition > Element
//!
//!     Each level parses its operands through [`ParseContext::parse`], which recurses one level
//!     down (wrapping from Element back to Alternation for the contents of groups and options)
//!     and simplifies what it gets back. Singleton wrappers such as a one-branch alternation or
//!     a `1*1` repetition therefore never reach the compiled tree.

pub mod alternation;
pub mod concatenation;
pub mod element;
pub mod group;
pub mod literal;
pub mod option;
pub mod prose;
pub mod reference;
pub mod repetition;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use alternation::Alternation;
pub use concatenation::Concatenation;
pub use group::Group;
pub use literal::{CharSet, Literal};
pub use option::Optional;
pub use prose::Prose;
pub use reference::Reference;
pub use repetition::Repetition;

use crate::abnf::error::Result;
use crate::abnf::evaluation::{Cursor, Node};
use crate::abnf::source::{TokenKind, TokenStream, INLINE_TRIVIA, TRIVIA};

/// The kind of expression that produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    Alternation,
    Concatenation,
    Group,
    Literal,
    Option,
    Prose,
    Reference,
    Repetition,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Alternation => "ALTERNATION",
            Kind::Concatenation => "CONCATENATION",
            Kind::Group => "GROUP",
            Kind::Literal => "LITERAL",
            Kind::Option => "OPTION",
            Kind::Prose => "PROSE",
            Kind::Reference => "REFERENCE",
            Kind::Repetition => "REPETITION",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled grammar expression.
///
/// Expressions own their children and never point back up; recursion between rules only
/// happens at evaluation time, through [`Reference`] names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Alternation(Alternation),
    Concatenation(Concatenation),
    Repetition(Repetition),
    Group(Group),
    Option(Optional),
    Literal(Literal),
    Reference(Reference),
    Prose(Prose),
}

impl Expression {
    pub fn kind(&self) -> Kind {
        match self {
            Expression::Alternation(_) => Kind::Alternation,
            Expression::Concatenation(_) => Kind::Concatenation,
            Expression::Repetition(_) => Kind::Repetition,
            Expression::Group(_) => Kind::Group,
            Expression::Option(_) => Kind::Option,
            Expression::Literal(_) => Kind::Literal,
            Expression::Reference(_) => Kind::Reference,
            Expression::Prose(_) => Kind::Prose,
        }
    }

    /// Evaluate against the input at `cursor`.
    pub fn evaluate<'a>(&self, cursor: &Cursor<'a>) -> Node<'a> {
        match self {
            Expression::Alternation(alternation) => alternation.evaluate(cursor),
            Expression::Concatenation(concatenation) => concatenation.evaluate(cursor),
            Expression::Repetition(repetition) => repetition.evaluate(cursor),
            Expression::Group(group) => group.evaluate(cursor),
            Expression::Option(option) => option.evaluate(cursor),
            Expression::Literal(literal) => literal.evaluate(cursor),
            Expression::Reference(reference) => reference.evaluate(cursor),
            Expression::Prose(prose) => prose.evaluate(cursor),
        }
    }

    /// Collapse singleton wrappers. Applying this twice gives the same result as once.
    pub fn simplify(self) -> Expression {
        match self {
            Expression::Alternation(alternation) => alternation.simplify(),
            Expression::Concatenation(concatenation) => concatenation.simplify(),
            Expression::Repetition(repetition) => repetition.simplify(),
            other => other,
        }
    }

    /// Alternatives of this expression: the branches of an alternation, else itself.
    pub fn into_branches(self) -> Vec<Expression> {
        match self {
            Expression::Alternation(alternation) => alternation.into_expressions(),
            other => vec![other],
        }
    }
}

/// Renders the expression back into grammar notation, with numeric values in hex.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Alternation(alternation) => join(f, alternation.expressions(), " / "),
            Expression::Concatenation(concatenation) => join(f, concatenation.expressions(), " "),
            Expression::Repetition(repetition) => write!(f, "{repetition}"),
            Expression::Group(group) => enclose(f, "(", group.expression(), ")"),
            Expression::Option(option) => enclose(f, "[", option.expression(), "]"),
            Expression::Literal(literal) => write!(f, "{literal}"),
            Expression::Reference(reference) => f.write_str(reference.name()),
            Expression::Prose(prose) => write!(f, "<{}>", prose.text()),
        }
    }
}

/// An empty body renders as `( )` or `[ ]` rather than with a doubled space.
fn enclose(f: &mut fmt::Formatter<'_>, open: &str, inner: &Expression, close: &str) -> fmt::Result {
    let inner = inner.to_string();
    if inner.is_empty() {
        write!(f, "{open} {close}")
    } else {
        write!(f, "{open} {inner} {close}")
    }
}

fn join(f: &mut fmt::Formatter<'_>, expressions: &[Expression], separator: &str) -> fmt::Result {
    for (index, expression) in expressions.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{expression}")?;
    }
    Ok(())
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<Reference> for Expression {
    fn from(reference: Reference) -> Self {
        Expression::Reference(reference)
    }
}

/// Precedence levels, loosest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Alternation,
    Concatenation,
    Repetition,
    Element,
}

impl Level {
    /// The level operands of this level are parsed at.
    pub fn next(self) -> Level {
        match self {
            Level::Alternation => Level::Concatenation,
            Level::Concatenation => Level::Repetition,
            Level::Repetition => Level::Element,
            Level::Element => Level::Alternation,
        }
    }
}

/// What a combinator's `parse` gets: the token stream and a way to parse its operands.
pub struct ParseContext<'c, 's> {
    pub stream: &'c mut TokenStream<'s>,
    level: Level,
}

impl<'c, 's> ParseContext<'c, 's> {
    pub fn new(stream: &'c mut TokenStream<'s>, level: Level) -> Self {
        Self { stream, level }
    }

    /// Parse one operand at the next level down and simplify it.
    pub fn parse(&mut self) -> Result<Expression> {
        parse_at(self.stream, self.level.next()).map(Expression::simplify)
    }
}

/// Parse a complete right-hand side.
pub fn parse(stream: &mut TokenStream<'_>) -> Result<Expression> {
    parse_at(stream, Level::Alternation).map(Expression::simplify)
}

fn parse_at(stream: &mut TokenStream<'_>, level: Level) -> Result<Expression> {
    let mut context = ParseContext::new(stream, level);
    match level {
        Level::Alternation => Alternation::parse(&mut context).map(Expression::Alternation),
        Level::Concatenation => Concatenation::parse(&mut context).map(Expression::Concatenation),
        Level::Repetition => Repetition::parse(&mut context).map(Expression::Repetition),
        Level::Element => element::parse(&mut context),
    }
}

/// Parse one more right-hand side for a rule that already exists and merge it into
/// `existing` as additional alternatives.
///
/// A `/` right after the assignment (`=/`) has already been consumed by the caller.
pub fn extend(stream: &mut TokenStream<'_>, existing: Expression) -> Result<Expression> {
    stream.skip(TRIVIA);

    let mut branches = existing.into_branches();
    branches.extend(parse(stream)?.into_branches());

    Ok(Expression::Alternation(Alternation::new(branches)))
}

/// Consume the `/` of an `=/` assignment, if present.
pub(crate) fn skip_incremental_marker(stream: &mut TokenStream<'_>) -> Result<()> {
    stream.skip(INLINE_TRIVIA);
    if stream.at(TokenKind::Slash) {
        stream.consume(TokenKind::Slash)?;
    }
    Ok(())
}

//! # abnf
//!
//! Compile ABNF grammars and match input against their rules.
//!
//! ```rust-example
//! use abnf::{Grammar, Mode, Query};
//!
//! let grammar = Grammar::core()?.extend(Mode::Lenient, "pair = key \"=\" value\nkey = 1*ALPHA\nvalue = 1*DIGIT\n")?;
//! let graph = grammar.rule("pair")?.graph("port=80");
//! let value = graph.find(&Query::new().with_name("value")).and_then(|node| node.text());
//! assert_eq!(value, Some("80"));
//! ```
//!
//! ## Testing
//!
//! Fixtures and parse tree assertions live in the [testing module](abnf::testing).

pub mod abnf;

pub use abnf::error::{CompileError, GrammarError};
pub use abnf::evaluation::{Graph, Node, Outcome, Query, Reason};
pub use abnf::expression::{Expression, Kind};
pub use abnf::grammar::{BoundRule, Grammar, Mode, Rule, RuleSet};

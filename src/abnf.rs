//! ABNF grammar compiler and evaluator
//!
//! Grammar text (RFC 5234, plus the RFC 7405 `%s` / `%i` string prefixes) is compiled into a
//! set of named rules. Any rule can then be evaluated against an input string, producing a
//! parse tree that records every attempted match, successful or not. The tree is queried for
//! captured sub-matches by rule name, rule path, or expression kind.
//!
//! Pipeline
//!
//!     grammar text -> source (tokens) -> expression (compiler) -> grammar (rule set)
//!     input + rule -> evaluation (interpreter) -> Node tree -> Graph queries
//!
//! Modules
//!
//!     source        tokens and the positional token stream the compiler reads
//!     expression    the combinators: parse, evaluate, simplify
//!     grammar       rule sets, compilation, extension and the core rules
//!     evaluation    cursors, parse tree nodes, graphs and queries
//!     formats       treeviz / json / yaml output for parse trees
//!     config        layered configuration for the command-line tool
//!     testing       fixtures and fluent parse tree assertions

pub mod config;
pub mod error;
pub mod evaluation;
pub mod expression;
pub mod formats;
pub mod grammar;
pub mod source;
pub mod testing;

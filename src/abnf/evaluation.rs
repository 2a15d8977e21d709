//! Evaluation of expressions against input
//!
//! Every evaluation step receives an immutable [`Cursor`] and returns a [`Node`]. Cursors are
//! never changed in place: [`Cursor::at`] and [`Cursor::label`] derive new ones that share the
//! unchanged parts (path stack, active-name map) with their parent.
//!
//! A failed match is data, not an error. The returned node tree keeps the attempts that led to
//! the outcome, and [`Graph`] answers queries over it.

pub mod context;
pub mod cursor;
pub mod graph;
pub mod node;
pub mod path;
pub mod query;

pub use context::Context;
pub use cursor::Cursor;
pub use graph::Graph;
pub use node::{Node, Outcome, Reason};
pub use path::Path;
pub use query::Query;

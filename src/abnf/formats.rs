//! Output formats for parse trees
//!
//! - treeviz: an indented box-drawing tree, one line per node
//! - json / yaml: the serde serialization of [`Node`](crate::abnf::evaluation::Node)

pub mod registry;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter, JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};

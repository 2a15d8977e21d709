//! Treeviz formatter for parse trees
//!
//!     └─ REFERENCE GREETING @0: "hi"
//!       └─ CONCATENATION @0: "hi"
//!         ├─ LITERAL @0: "h"
//!         └─ LITERAL @1: "i"

use crate::abnf::evaluation::{Node, Outcome};
use crate::abnf::expression::Kind;
use crate::abnf::formats::registry::{FormatError, Formatter};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Render `root` and its descendants. Failed children are left out unless `show_failures`.
pub fn to_treeviz_str(root: &Node<'_>, label_width: usize, show_failures: bool) -> String {
    let mut result = String::new();
    append_node(&mut result, root, "", true, label_width, show_failures);
    result
}

fn append_node(
    result: &mut String,
    node: &Node<'_>,
    prefix: &str,
    is_last: bool,
    label_width: usize,
    show_failures: bool,
) {
    let connector = if is_last { "└─" } else { "├─" };
    let name = match (node.kind(), node.path().tail()) {
        (Kind::Reference, Some(tail)) => format!(" {tail}"),
        _ => String::new(),
    };
    let label = match node.outcome() {
        Outcome::Success { .. } => {
            format!("{:?}", truncate(node.text().unwrap_or_default(), label_width))
        }
        Outcome::Failure { reason } => format!("✗ {}", reason.as_str()),
    };

    result.push_str(&format!(
        "{}{} {}{} @{}: {}\n",
        prefix,
        connector,
        node.kind(),
        name,
        node.index(),
        label
    ));

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children: Vec<&Node<'_>> = node
        .children()
        .iter()
        .filter(|child| show_failures || child.is_success())
        .collect();
    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;
        append_node(result, child, &new_prefix, is_last, label_width, show_failures);
    }
}

/// Registry entry for treeviz output.
#[derive(Debug, Clone, Copy)]
pub struct TreevizFormatter {
    pub label_width: usize,
    pub show_failures: bool,
}

impl Default for TreevizFormatter {
    fn default() -> Self {
        Self {
            label_width: 30,
            show_failures: true,
        }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, node: &Node<'_>) -> Result<String, FormatError> {
        Ok(to_treeviz_str(node, self.label_width, self.show_failures))
    }

    fn description(&self) -> &str {
        "Indented tree, one line per evaluated expression"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::testing::grammar;

    #[test]
    fn renders_a_successful_match() {
        let grammar = grammar("greeting = \"h\" %s\"i\"\n");
        let node = grammar.rule("greeting").unwrap().evaluate("hi there");

        insta::assert_snapshot!(to_treeviz_str(&node, 30, true), @r###"
        └─ CONCATENATION @0: "hi"
          ├─ LITERAL @0: "h"
          └─ LITERAL @1: "i"
        "###);
    }

    #[test]
    fn renders_reference_names_and_failures() {
        let grammar = grammar("pair = a / b\na = \"x\"\nb = \"y\"\n");
        let node = grammar.rule("pair").unwrap().evaluate("y");

        insta::assert_snapshot!(to_treeviz_str(&node, 30, true), @r###"
        └─ ALTERNATION @0: "y"
          └─ REFERENCE B @0: "y"
            └─ LITERAL @0: "y"
        "###);

        let failed = grammar.rule("pair").unwrap().evaluate("z");
        insta::assert_snapshot!(to_treeviz_str(&failed, 30, true), @r###"
        └─ ALTERNATION @0: ✗ ALTERNATION_NO_MATCH
          ├─ REFERENCE A @0: ✗ REFERENCE_EVALUATION_FAILED
          │ └─ LITERAL @0: ✗ LITERAL_CHARSET_MISMATCH
          └─ REFERENCE B @0: ✗ REFERENCE_EVALUATION_FAILED
            └─ LITERAL @0: ✗ LITERAL_CHARSET_MISMATCH
        "###);
    }

    #[test]
    fn hides_failed_children() {
        let grammar = grammar("opt = [\"x\"] \"y\"\n");
        let node = grammar.rule("opt").unwrap().evaluate("y");
        let rendered = to_treeviz_str(&node, 30, false);

        assert!(!rendered.contains('✗'));
        assert!(rendered.contains("OPTION @0: \"\""));
    }

    #[test]
    fn truncates_long_labels() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
    }
}

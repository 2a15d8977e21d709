//! Compiled grammars
//!
//! A [`Grammar`] is the rule set compiled from one grammar source. It is immutable: [`extend`]
//! appends more source and recompiles the whole text into a new grammar, so rules of the
//! extension may reference, and add alternatives to, rules of the base.
//!
//! Most grammars build on the RFC 5234 core rules (ALPHA, DIGIT, CRLF, ...):
//!
//!     let grammar = Grammar::core()?.extend(Mode::Lenient, "greeting = 1*ALPHA\n")?;
//!     let node = grammar.rule("greeting")?.evaluate("hello");
//!
//! [`extend`]: Grammar::extend

pub mod core_rules;
pub mod mode;
pub mod rule;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;

pub use mode::Mode;
pub use rule::{BoundRule, Rule};

use crate::abnf::error::{CompileError, GrammarError, Result};
use crate::abnf::source::{TokenStream, TRIVIA};

/// Rules by uppercased name, in order of first definition.
pub type RuleSet = IndexMap<String, Rule>;

static CORE: Lazy<Result<Grammar>> = Lazy::new(|| Grammar::compile(Mode::Lenient, core_rules::SOURCE));

#[derive(Debug, Clone)]
pub struct Grammar {
    source: String,
    rules: RuleSet,
}

impl Grammar {
    /// Compile `source`; in lenient mode bare `\n` line endings are accepted.
    pub fn compile(mode: Mode, source: &str) -> Result<Self> {
        Self::from_source(mode.normalize(source).into_owned())
    }

    /// A new grammar from this grammar's source followed by `extension`.
    pub fn extend(&self, mode: Mode, extension: &str) -> Result<Self> {
        let mut source = self.source.clone();
        source.push_str(&mode.normalize(extension));
        Self::from_source(source)
    }

    /// The RFC 5234 Appendix B.1 core rules, compiled on first use.
    pub fn core() -> Result<&'static Grammar> {
        CORE.as_ref().map_err(Clone::clone)
    }

    /// The accumulated (normalized) source this grammar was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Look up a rule by name, in any casing.
    pub fn rule(&self, name: &str) -> Result<BoundRule<'_>, GrammarError> {
        let key = name.to_uppercase();
        self.rules
            .get(&key)
            .map(|rule| BoundRule::new(rule, &self.rules))
            .ok_or(GrammarError::RuleNotFound(name.to_string()))
    }

    fn from_source(source: String) -> Result<Self> {
        let rules = compile_rules(&source)?;
        debug!(
            rules = rules.len(),
            source_length = source.len(),
            "compiled grammar"
        );
        Ok(Self { source, rules })
    }
}

fn compile_rules(source: &str) -> Result<RuleSet> {
    let mut stream = TokenStream::new(source)?;
    let mut rules = RuleSet::new();

    stream.skip(TRIVIA);
    while stream.is_open() {
        let rule = Rule::parse(&rules, &mut stream)?;
        rules.insert(rule.name().to_string(), rule);
        stream.skip(TRIVIA);
    }

    Ok(rules)
}

impl TryFrom<&str> for Grammar {
    type Error = CompileError;

    /// Strict compilation.
    fn try_from(source: &str) -> Result<Self> {
        Self::compile(Mode::Strict, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abnf::expression::{Expression, Kind};

    #[test]
    fn keeps_rules_in_definition_order() {
        let grammar = Grammar::compile(Mode::Lenient, "b = a\na = \"x\"\nc = b\n").unwrap();
        let names: Vec<_> = grammar.rules().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn looks_rules_up_in_any_casing() {
        let grammar = Grammar::compile(Mode::Lenient, "Rule-Name = \"x\"\n").unwrap();
        assert_eq!(grammar.rule("rule-name").unwrap().name(), "RULE-NAME");
        assert_eq!(grammar.rule("RULE-name").unwrap().name(), "RULE-NAME");
    }

    #[test]
    fn missing_rule() {
        let grammar = Grammar::compile(Mode::Lenient, "a = \"x\"\n").unwrap();
        let error = grammar.rule("b").unwrap_err();
        assert_eq!(error, GrammarError::RuleNotFound("b".to_string()));
        assert_eq!(error.to_string(), "rule not found: b");
    }

    #[test]
    fn trims_leading_whitespace_and_comments() {
        let source = "\n\n  ; a comment\n\na = \"x\" ; trailing\n\n; closing comment\n";
        let grammar = Grammar::compile(Mode::Lenient, source).unwrap();
        assert_eq!(grammar.rules().len(), 1);
    }

    #[test]
    fn strict_mode_keeps_the_source_as_given() {
        let grammar = Grammar::compile(Mode::Strict, "a = \"x\"\nb = \"y\"\r\n").unwrap();
        assert_eq!(grammar.source(), "a = \"x\"\nb = \"y\"\r\n");
        assert_eq!(grammar.rules().len(), 2);
        assert!(Grammar::try_from("a = \"x\"\r\n").is_ok());
    }

    #[test]
    fn lenient_mode_normalizes_the_stored_source() {
        let grammar = Grammar::compile(Mode::Lenient, "a = \"x\"\n").unwrap();
        assert_eq!(grammar.source(), "a = \"x\"\r\n");
    }

    #[test]
    fn reports_the_first_syntax_error() {
        let result = Grammar::compile(Mode::Lenient, "a = \"x\"\nb \"y\"\n");
        assert!(matches!(result, Err(CompileError::Expected { .. })));
    }

    #[test]
    fn unlexable_source() {
        let result = Grammar::compile(Mode::Lenient, "a = \"x\" #\n");
        assert_eq!(result.unwrap_err(), CompileError::UnexpectedCharacter { offset: 8 });
    }

    #[test]
    fn extend_layers_over_the_base() {
        let base = Grammar::compile(Mode::Lenient, "a = \"x\"\n").unwrap();
        let extended = base.extend(Mode::Lenient, "b = a a\n").unwrap();

        assert_eq!(base.rules().len(), 1);
        assert_eq!(extended.rules().len(), 2);
        assert_eq!(extended.rule("b").unwrap().evaluate("xx").length(), Some(2));
    }

    #[test]
    fn extension_merges_alternatives_into_base_rules() {
        let base = Grammar::compile(Mode::Lenient, "a = \"x\"\n").unwrap();
        let extended = base.extend(Mode::Lenient, "a =/ \"y\"\n").unwrap();

        let rule = extended.rule("a").unwrap();
        assert_eq!(rule.expression().kind(), Kind::Alternation);
        assert_eq!(rule.evaluate("y").length(), Some(1));
    }

    #[test]
    fn extension_with_plain_assignment_adds_alternatives() {
        let base = Grammar::compile(Mode::Lenient, "a = \"x\"\n").unwrap();
        let extended = base.extend(Mode::Lenient, "a = \"y\"\n").unwrap();

        let rule = extended.rule("a").unwrap();
        assert_eq!(extended.rules().len(), 1);
        assert_eq!(rule.expression().to_string(), "(%x58 / %x78) / (%x59 / %x79)");
        assert_eq!(rule.evaluate("y").length(), Some(1));
        assert_eq!(rule.evaluate("x").length(), Some(1));
    }

    #[test]
    fn core_grammar_has_the_appendix_rules() {
        let core = Grammar::core().unwrap();
        for name in [
            "ALPHA", "BIT", "CHAR", "CR", "CRLF", "CTL", "DIGIT", "DQUOTE", "HEXDIG", "HTAB", "LF",
            "LWSP", "OCTET", "SP", "VCHAR", "WSP",
        ] {
            assert!(core.rule(name).is_ok(), "missing core rule {name}");
        }
        assert!(matches!(
            core.rule("ALPHA").unwrap().expression(),
            Expression::Alternation(_)
        ));
    }
}

//! RFC 5234 Appendix B.1 core rules
//!
//! These are the rules nearly every ABNF grammar assumes. They are compiled lazily by
//! [`Grammar::core`](crate::abnf::grammar::Grammar::core) and extended by user grammars.

pub const SOURCE: &str = include_str!("core.abnf");

#[cfg(test)]
mod tests {
    use crate::abnf::grammar::Grammar;
    use rstest::rstest;

    #[rstest]
    #[case("ALPHA", "q", true)]
    #[case("ALPHA", "7", false)]
    #[case("BIT", "1", true)]
    #[case("CRLF", "\r\n", true)]
    #[case("CRLF", "\n", false)]
    #[case("DIGIT", "9", true)]
    #[case("DQUOTE", "\"", true)]
    #[case("HEXDIG", "f", true)]
    #[case("HEXDIG", "g", false)]
    #[case("LWSP", " \r\n\t", true)]
    #[case("OCTET", "\u{ff}", true)]
    #[case("VCHAR", "~", true)]
    #[case("VCHAR", " ", false)]
    #[case("WSP", "\t", true)]
    fn matches_single_values(#[case] rule: &str, #[case] input: &str, #[case] matches: bool) {
        let core = Grammar::core().unwrap();
        let node = core.rule(rule).unwrap().evaluate(input);
        assert_eq!(node.length() == Some(input.len()), matches);
    }
}

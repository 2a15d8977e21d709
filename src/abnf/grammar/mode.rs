//! Line-ending handling for grammar source

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LINE_ENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").unwrap());

/// How grammar source is read before compilation.
///
/// RFC 5234 requires CRLF line endings. Lenient mode rewrites every line ending to CRLF so
/// grammars written with bare `\n` compile to the same source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Strict,
    #[default]
    Lenient,
}

impl Mode {
    pub fn normalize<'s>(&self, source: &'s str) -> Cow<'s, str> {
        match self {
            Mode::Strict => Cow::Borrowed(source),
            Mode::Lenient => LINE_ENDING.replace_all(source, "\r\n"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Mode::Strict),
            "lenient" => Ok(Mode::Lenient),
            other => Err(format!("unknown mode '{other}', expected strict or lenient")),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Strict => f.write_str("strict"),
            Mode::Lenient => f.write_str("lenient"),
        }
    }
}

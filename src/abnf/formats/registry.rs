//! Format registry for parse tree serialization
//!
//! Each format implements [`Formatter`] and is looked up by name in a [`FormatRegistry`].

use std::collections::HashMap;

use thiserror::Error;

use crate::abnf::evaluation::Node;
use crate::abnf::formats::treeviz::TreevizFormatter;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
}

pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "json")
    fn name(&self) -> &str;

    fn serialize(&self, node: &Node<'_>) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &Node<'_>) -> Result<String, FormatError> {
        serde_json::to_string_pretty(node)
            .map_err(|error| FormatError::SerializationError(error.to_string()))
    }

    fn description(&self) -> &str {
        "Parse tree as JSON"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, node: &Node<'_>) -> Result<String, FormatError> {
        serde_yaml::to_string(node)
            .map_err(|error| FormatError::SerializationError(error.to_string()))
    }

    fn description(&self) -> &str {
        "Parse tree as YAML"
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any formatter of the same name.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, node: &Node<'_>, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(node)
    }

    /// All format names, sorted.
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// A registry with treeviz (default options), json and yaml.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TreevizFormatter::default());
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

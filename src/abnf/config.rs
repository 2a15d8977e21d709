//! Configuration loading
//!
//! `defaults/abnf.default.toml` is embedded into the binary and documents every key. User
//! files and command-line overrides are layered over it with [`Loader`] before deserializing
//! into [`AbnfConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::abnf::grammar::Mode;

const DEFAULT_TOML: &str = include_str!("../../defaults/abnf.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct AbnfConfig {
    pub compile: CompileConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileConfig {
    pub mode: Mode,
    /// Layer grammars over the core rules.
    pub core: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_failures: bool,
    pub label_width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Treeviz,
    Json,
    Yaml,
}

impl OutputFormat {
    /// The name the format is registered under.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Layers user settings over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a configuration file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a command-line flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<AbnfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<AbnfConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.compile.mode, Mode::Lenient);
        assert!(config.compile.core);
        assert_eq!(config.output.format, OutputFormat::Treeviz);
        assert!(!config.output.show_failures);
        assert_eq!(config.output.label_width, 30);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("compile.mode", "strict")
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.compile.mode, Mode::Strict);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn layers_a_user_file() {
        let path = std::env::temp_dir().join(format!("abnf-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        writeln!(file, "[output]\nlabel_width = 12").expect("write temp file");

        let config = Loader::new().with_file(&path).build();
        std::fs::remove_file(&path).ok();

        let config = config.expect("config to build");
        assert_eq!(config.output.label_width, 12);
        assert_eq!(config.output.format, OutputFormat::Treeviz);
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/abnf.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.label_width, 30);
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/abnf.toml").build().is_err());
    }
}

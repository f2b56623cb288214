//! Layered configuration.
//!
//! `defaults/mightymath.default.toml` is embedded into the binary so the
//! documented defaults and the runtime behaviour stay in sync. [`Loader`]
//! layers user files and overrides on top before deserializing into
//! [`MightyMathConfig`].

use crate::math::{CompileOptions, DisplayMode};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/mightymath.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct MightyMathConfig {
    pub output: OutputConfig,
    pub input: InputConfig,
}

/// How markup is written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub display: DisplayMode,
    pub pretty: bool,
    pub indent: String,
}

/// How source text is read.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub tab_width: usize,
    pub delimiter: String,
}

impl From<&MightyMathConfig> for CompileOptions {
    fn from(config: &MightyMathConfig) -> Self {
        CompileOptions {
            mode: config.output.display,
            pretty: config.output.pretty,
            indent: config.output.indent.clone(),
            tab_width: config.input.tab_width,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override, e.g. from a CLI flag.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<MightyMathConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MightyMathConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.output.display, DisplayMode::Block);
        assert!(!config.output.pretty);
        assert_eq!(config.input.tab_width, 2);
        assert_eq!(config.input.delimiter, "###");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.display", "inline")
            .expect("override to apply")
            .set_override("input.tab_width", 4i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.display, DisplayMode::Inline);
        assert_eq!(config.input.tab_width, 4);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[output]\npretty = true").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(config.output.pretty);
        assert_eq!(config.output.indent, "  ");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/mightymath.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.input.delimiter, "###");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/mightymath.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn converts_to_compile_options() {
        let config = load_defaults().expect("defaults to deserialize");
        let options = CompileOptions::from(&config);
        assert_eq!(options.mode, DisplayMode::Block);
        assert_eq!(options.tab_width, 2);
    }
}

//! Format registry
//!
//! Each output format implements [`Formatter`] and is looked up by name in a
//! [`FormatRegistry`].

use crate::math::ast::Node;
use crate::math::{CompileOptions, DisplayMode};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Something that can write a laid-out tree as text.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g. "mathml", "treeviz")
    fn name(&self) -> &str;

    fn serialize(&self, tree: &Node) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter, replacing any with the same name.
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

    pub fn serialize(&self, tree: &Node, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(tree)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registry with every built-in format.
    pub fn with_defaults() -> Self {
        Self::with_options(&CompileOptions::default())
    }

    /// Every built-in format, with the MathML writers following `options`.
    pub fn with_options(options: &CompileOptions) -> Self {
        let mut registry = Self::new();

        registry.register(super::MathmlFormatter::with_options(DisplayMode::Inline, options));
        registry.register(super::MathmlFormatter::with_options(DisplayMode::Block, options));
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

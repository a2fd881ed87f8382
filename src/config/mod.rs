//! Optional KDL config shared by both hooks.
//!
//! ```kdl
//! timeout 45
//! lint {
//!     extensions ".ts" ".tsx" ".js" ".jsx"
//! }
//! ```
//!
//! Every node is optional; an empty file changes nothing.

mod document;

use std::path::{Path, PathBuf};
use std::time::Duration;

use document::{ConfigDocument, ConfigSection};

use crate::lint::Extensions;

/// Top-level configuration loaded from a KDL file.
#[derive(Debug, Default)]
pub struct Config {
    /// Default command timeout, overridden by `--timeout`.
    pub timeout: Option<Duration>,
    pub lint: LintConfig,
}

/// Settings for `lint-file`.
#[derive(Debug, Default)]
pub struct LintConfig {
    /// Replaces the built-in allow-list when present.
    pub extensions: Option<Extensions>,
}

/// Errors that can occur when loading or parsing a config file.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    #[diagnostic(code(edit_hooks::config::not_found))]
    NotFound(PathBuf),
    #[error("failed to read config: {0}")]
    #[diagnostic(code(edit_hooks::config::read))]
    ReadError(#[from] std::io::Error),
    #[error("invalid KDL syntax: {0}")]
    #[diagnostic(code(edit_hooks::config::syntax))]
    ParseError(String),
    #[error("invalid config: {0}")]
    #[diagnostic(
        code(edit_hooks::config::invalid),
        help("expected `timeout <seconds>` and `lint {{ extensions \".ts\" ... }}`")
    )]
    ValidationError(String),
}

impl Config {
    /// Load a config from a KDL file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::load(path)?)
    }

    /// Parse a KDL string into a Config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Self::from_document(&ConfigDocument::parse(content)?)
    }

    fn from_document(doc: &ConfigDocument) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        for node in doc.root().nodes() {
            match node.name() {
                "timeout" => {
                    let secs = node
                        .single_integer()
                        .and_then(|n| u64::try_from(n).ok())
                        .filter(|&n| n > 0)
                        .ok_or_else(|| {
                            ConfigError::ValidationError(format!(
                                "line {}: timeout must be a single positive integer",
                                node.line()
                            ))
                        })?;
                    config.timeout = Some(Duration::from_secs(secs));
                }
                "lint" => {
                    if let Some(children) = node.children() {
                        config.lint = LintConfig::from_section(&children)?;
                    }
                }
                other => {
                    return Err(ConfigError::ValidationError(format!(
                        "line {}: unknown node `{other}`",
                        node.line()
                    )))
                }
            }
        }
        Ok(config)
    }
}

impl LintConfig {
    fn from_section(section: &ConfigSection<'_>) -> Result<Self, ConfigError> {
        let mut extensions: Option<Vec<String>> = None;
        for node in section.nodes() {
            if node.name() != "extensions" {
                return Err(ConfigError::ValidationError(format!(
                    "line {}: unknown lint setting `{}`",
                    node.line(),
                    node.name()
                )));
            }
            let values = node.string_values().ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "line {}: extensions must be plain strings",
                    node.line()
                ))
            })?;
            if values.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "line {}: extensions needs at least one entry",
                    node.line()
                )));
            }
            if let Some(bad) = values.iter().find(|v| !v.starts_with('.') || v.len() < 2) {
                return Err(ConfigError::ValidationError(format!(
                    "line {}: extension {bad:?} must start with '.'",
                    node.line()
                )));
            }
            // Repeated `extensions` nodes merge.
            extensions
                .get_or_insert_with(Vec::new)
                .extend(values.into_iter().map(String::from));
        }
        Ok(LintConfig {
            extensions: extensions.map(Extensions::new),
        })
    }
}

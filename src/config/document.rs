//! Config document abstraction layer.
//!
//! `ConfigDocument`, `ConfigSection`, and `ParseNode` wrap the `kdl` crate
//! types so the rest of the config module never touches KDL directly.

use super::ConfigError;

/// Parsed KDL document paired with its source text.
pub(super) struct ConfigDocument {
    doc: kdl::KdlDocument,
    source: String,
}

/// Borrowed view into a list of KDL nodes: the top level or a children block.
pub(super) struct ConfigSection<'a> {
    doc: &'a kdl::KdlDocument,
    source: &'a str,
}

/// Single KDL node with source context for line-number reporting.
pub(super) struct ParseNode<'a> {
    node: &'a kdl::KdlNode,
    source: &'a str,
}

impl ConfigDocument {
    pub(super) fn parse(source: &str) -> Result<Self, ConfigError> {
        let doc: kdl::KdlDocument = source
            .parse()
            .map_err(|e: kdl::KdlError| ConfigError::ParseError(e.to_string()))?;
        Ok(Self {
            doc,
            source: source.to_string(),
        })
    }

    pub(super) fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::ReadError(e)
            }
        })?;
        Self::parse(&content)
    }

    /// The top-level nodes.
    pub(super) fn root(&self) -> ConfigSection<'_> {
        ConfigSection {
            doc: &self.doc,
            source: &self.source,
        }
    }
}

impl<'a> ConfigSection<'a> {
    pub(super) fn nodes(&self) -> Vec<ParseNode<'a>> {
        self.doc
            .nodes()
            .iter()
            .map(|node| ParseNode {
                node,
                source: self.source,
            })
            .collect()
    }
}

impl<'a> ParseNode<'a> {
    /// The node's identifier (e.g. `"timeout"`, `"extensions"`).
    pub(super) fn name(&self) -> &str {
        self.node.name().value()
    }

    /// Collect all string-valued arguments, or `None` if any entry is a
    /// property (`key=value`) or not a string.
    pub(super) fn string_values(&self) -> Option<Vec<&'a str>> {
        self.node
            .entries()
            .iter()
            .map(|e| match e.name() {
                Some(_) => None,
                None => e.value().as_string(),
            })
            .collect()
    }

    /// The node's only entry as an integer, e.g. `timeout 45`.
    pub(super) fn single_integer(&self) -> Option<i128> {
        match self.node.entries() {
            [entry] if entry.name().is_none() => entry.value().as_integer(),
            _ => None,
        }
    }

    /// Get the children block as a borrowed `ConfigSection` (preserving source).
    pub(super) fn children(&self) -> Option<ConfigSection<'a>> {
        self.node.children().map(|doc| ConfigSection {
            doc,
            source: self.source,
        })
    }

    /// 1-based line number of this node in the original source.
    pub(super) fn line(&self) -> usize {
        let offset = self.node.span().offset();
        self.source[..offset.min(self.source.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}

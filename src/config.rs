//! Adapter configuration
//!
//! Recognized options only; unknown keys are rejected. Missing keys take
//! their defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;

/// Default base for node namespaces and relationship types
pub const DEFAULT_NAMESPACE_BASE: &str = "http://graph-rdf.local/nodes/";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File extension is neither YAML nor JSON
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Triple store adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// Base stripped from namespaces when deriving node types
    pub node_namespace_base: String,
    /// Base for relationship types that are not absolute IRIs
    pub relationship_namespace_base: String,
    /// Node types hidden from every query
    pub ignored_types: BTreeSet<String>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            node_namespace_base: DEFAULT_NAMESPACE_BASE.to_string(),
            relationship_namespace_base: DEFAULT_NAMESPACE_BASE.to_string(),
            ignored_types: [crate::graph::REFERENCE_TYPE.to_string()].into_iter().collect(),
        }
    }
}

impl AdapterConfig {
    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_json_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let contents = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&contents),
            "json" => Self::from_json_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

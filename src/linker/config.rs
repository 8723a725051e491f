use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root attribute used when none is configured
pub const DEFAULT_ROOT: &str = "data";

/// Configuration for linking and embedding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkerConfig {
    /// Relation fields to link, in order
    pub relations: Vec<String>,

    /// Envelope attribute holding the primary resource
    pub root_attribute: String,
}

impl Default for LinkerConfig {
    fn default() -> Self {
        LinkerConfig {
            relations: vec![],
            root_attribute: String::from(DEFAULT_ROOT),
        }
    }
}

impl LinkerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Add one relation to link
    pub fn relation(mut self, name: impl Into<String>) -> Self {
        self.relations.push(name.into());
        self
    }

    /// Add several relations to link, after the ones already configured
    pub fn relations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root_attribute = root.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relations_accumulate() {
        let config = LinkerConfig::new()
            .relation("author")
            .relations(["tags", "comments"])
            .relation("editor");

        assert_eq!(config.relations, vec!["author", "tags", "comments", "editor"]);
        assert_eq!(config.root_attribute, DEFAULT_ROOT);
    }

    #[test]
    fn test_partial_config_from_json() {
        let config: LinkerConfig = serde_json::from_str(r#"{"relations": ["author"]}"#).unwrap();

        assert_eq!(config.relations, vec!["author"]);
        assert_eq!(config.root_attribute, DEFAULT_ROOT);
    }

    #[test]
    fn test_config_from_file() {
        let path = std::env::temp_dir().join(format!("json-linker-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"relations": ["tags"], "root_attribute": "model"}"#).unwrap();

        let config = LinkerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config, LinkerConfig::new().relation("tags").with_root("model"));
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = LinkerConfig::from_file("/nonexistent/json-linker.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

// options.rs — Connection options handed to connector constructors.
//
// A ConnOptions value names a connection, says which connector should serve
// it, and carries free-form string items the connector interprets (for the
// local backend: `data_dir`, `confinement`). It is usually loaded from a
// small TOML file:
//
//   name = "local"
//   connector = "localfs"
//
//   [items]
//   data_dir = "/var/lib/fo"

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConnectError;

/// Named key → value options for one connector instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnOptions {
    /// Human-readable connection name.
    #[serde(default)]
    pub name: String,

    /// Connector kind, e.g. "localfs".
    #[serde(default)]
    pub connector: String,

    /// Connector-specific items.
    #[serde(default)]
    pub items: BTreeMap<String, String>,
}

impl ConnOptions {
    /// Create options with no items.
    pub fn new(name: impl Into<String>, connector: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connector: connector.into(),
            items: BTreeMap::new(),
        }
    }

    /// Builder-style item setter.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set (or replace) an item.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    /// Look up an item.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConnectError> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConnectError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConnectError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builder_sets_items() {
        let opts = ConnOptions::new("local", "localfs").with_item("data_dir", "/srv/data");

        assert_eq!(opts.name, "local");
        assert_eq!(opts.connector, "localfs");
        assert_eq!(opts.get("data_dir"), Some("/srv/data"));
        assert_eq!(opts.get("missing"), None);
    }

    #[test]
    fn set_replaces_existing_item() {
        let mut opts = ConnOptions::default().with_item("data_dir", "/a");
        opts.set("data_dir", "/b");
        assert_eq!(opts.get("data_dir"), Some("/b"));
    }

    #[test]
    fn parse_toml_document() {
        let opts = ConnOptions::from_toml_str(
            r#"
name = "local"
connector = "localfs"

[items]
data_dir = "/var/lib/fo"
confinement = "strict"
"#,
        )
        .unwrap();

        assert_eq!(opts.name, "local");
        assert_eq!(opts.get("data_dir"), Some("/var/lib/fo"));
        assert_eq!(opts.get("confinement"), Some("strict"));
    }

    #[test]
    fn parse_toml_without_items() {
        let opts = ConnOptions::from_toml_str("name = \"bare\"").unwrap();
        assert!(opts.items.is_empty());
        assert!(opts.connector.is_empty());
    }

    #[test]
    fn parse_invalid_toml_fails() {
        let result = ConnOptions::from_toml_str("items = 3");
        assert!(matches!(result, Err(ConnectError::ParseFailed(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conn.toml");
        std::fs::write(&path, "connector = \"localfs\"\n[items]\ndata_dir = \"/tmp\"\n").unwrap();

        let opts = ConnOptions::load(&path).unwrap();
        assert_eq!(opts.connector, "localfs");
        assert_eq!(opts.get("data_dir"), Some("/tmp"));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = ConnOptions::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConnectError::ReadFailed { .. })));
    }
}

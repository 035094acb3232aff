use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "RewriteMaps.config";

/// Files probed, in order, when no `--config` is given.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["rewritemap.config.json", "config/rewritemap.config.json"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_output")]
    pub output: PathBuf,

    #[serde(default = "default_lowercase_values")]
    pub lowercase_values: bool,

    #[serde(default = "default_indent")]
    pub indent: usize,

    #[serde(default = "default_xml_declaration")]
    pub xml_declaration: bool,

    #[serde(default)]
    pub map_name: Option<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}
fn default_lowercase_values() -> bool {
    true
}
fn default_indent() -> usize {
    2
}
fn default_xml_declaration() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: default_output(),
            lowercase_values: true,
            indent: 2,
            xml_declaration: true,
            map_name: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `explicit` if given, else the first default path that exists,
    /// else built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Config> {
        if let Some(path) = explicit {
            return Config::load(path);
        }
        for p in DEFAULT_CONFIG_PATHS {
            let path = Path::new(p);
            if path.is_file() {
                tracing::debug!(config = %path.display(), "using config file");
                return Config::load(path);
            }
        }
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output, PathBuf::from("RewriteMaps.config"));
        assert!(config.lowercase_values);
        assert_eq!(config.indent, 2);
        assert!(config.xml_declaration);
        assert!(config.map_name.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "output": "out/Maps.config",
            "lowercase_values": false,
            "indent": 4,
            "xml_declaration": false,
            "map_name": "Legacy"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.output, PathBuf::from("out/Maps.config"));
        assert!(!config.lowercase_values);
        assert_eq!(config.indent, 4);
        assert!(!config.xml_declaration);
        assert_eq!(config.map_name.as_deref(), Some("Legacy"));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: Config = serde_json::from_str(r#"{"indent": 0}"#).unwrap();
        assert_eq!(config.indent, 0);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(config.lowercase_values);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}

//! Source definition loading from TOML files.
//!
//! A source list is a TOML document with a `[[sources]]` array. The loader
//! accepts either a single such file or a directory tree of them.

use crate::{
    definition::SourceDefinition,
    error::{Result, SourceError},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loader for source definitions from TOML files.
pub struct SourceLoader {
    /// A source list file, or a directory containing source list files
    path: PathBuf,
}

#[derive(Deserialize)]
struct SourceList {
    #[serde(default)]
    sources: Vec<toml::Value>,
}

impl SourceLoader {
    /// Create a new loader for the given file or directory.
    ///
    /// # Errors
    /// Returns error if the path doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(SourceError::DefinitionsNotFound {
                path: path.display().to_string(),
            });
        }

        Ok(Self { path })
    }

    /// Load all source definitions.
    ///
    /// Entries that fail to deserialize or validate are logged as warnings
    /// and skipped, so one broken entry never hides the others. In directory
    /// mode, whole files that fail to parse are skipped the same way.
    ///
    /// # Errors
    /// Returns error if a single-file source list can't be read or parsed,
    /// or if a directory can't be read.
    pub fn load_all(&self) -> Result<Vec<SourceDefinition>> {
        let mut definitions = Vec::new();

        if self.path.is_dir() {
            Self::walk_and_load_recursive(&self.path, &mut definitions)?;
        } else {
            let contents = Self::read(&self.path)?;
            definitions.extend(Self::parse_list(&contents, &self.path)?);
        }

        info!(
            count = definitions.len(),
            path = %self.path.display(),
            "loaded source definitions"
        );

        Ok(definitions)
    }

    /// Parse a source list held in memory.
    ///
    /// # Errors
    /// Returns error if the document is not valid TOML.
    pub fn parse_str(contents: &str) -> Result<Vec<SourceDefinition>> {
        Self::parse_list(contents, Path::new("<memory>"))
    }

    /// Recursively walk directory and load all TOML files in name order.
    fn walk_and_load_recursive(dir: &Path, definitions: &mut Vec<SourceDefinition>) -> Result<()> {
        let mut paths = std::fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            if path.is_dir() {
                Self::walk_and_load_recursive(&path, definitions)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                let parsed = Self::read(&path).and_then(|c| Self::parse_list(&c, &path));
                match parsed {
                    Ok(loaded) => definitions.extend(loaded),
                    Err(e) => {
                        warn!(
                            path = %path.display(),
                            error = %e,
                            "failed to load source list"
                        );
                    }
                }
            }
        }

        Ok(())
    }

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| SourceError::LoadError {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn parse_list(contents: &str, path: &Path) -> Result<Vec<SourceDefinition>> {
        let list: SourceList = toml::from_str(contents).map_err(|e| SourceError::ParseError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut definitions = Vec::with_capacity(list.sources.len());

        for (index, entry) in list.sources.into_iter().enumerate() {
            let definition = match SourceDefinition::deserialize(entry) {
                Ok(definition) => definition,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        index,
                        error = %e,
                        "skipping malformed source entry"
                    );
                    continue;
                }
            };

            if let Err(e) = definition.validate() {
                warn!(
                    path = %path.display(),
                    source_id = %definition.id,
                    error = %e,
                    "skipping invalid source definition"
                );
                continue;
            }

            debug!(source_id = %definition.id, adapter = %definition.adapter, "parsed source definition");
            definitions.push(definition);
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TWO_SOURCES: &str = r#"
[[sources]]
id = "clay"
name = "Clay"
enabled = true
adapter = "clay"

[sources.settings]
api_key = "${CLAY_API_KEY}"

[[sources]]
id = "internal_db"
name = "InternalDB"
enabled = false
adapter = "internal-db"
"#;

    #[test]
    fn test_loader_missing_path() {
        let result = SourceLoader::new("/nonexistent/sources.toml");
        assert!(matches!(
            result,
            Err(SourceError::DefinitionsNotFound { .. })
        ));
    }

    #[test]
    fn test_load_single_file_preserves_order() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("sources.toml");
        fs::write(&path, TWO_SOURCES).expect("write source list");

        let loader = SourceLoader::new(&path).expect("create loader");
        let definitions = loader.load_all().expect("load definitions");

        let ids: Vec<_> = definitions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["clay", "internal_db"]);
        assert!(definitions[0].enabled);
        assert!(!definitions[1].enabled);
    }

    #[test]
    fn test_malformed_entry_is_skipped() {
        let contents = r#"
[[sources]]
id = "Bad Id"
name = "Broken"
adapter = "clay"

[[sources]]
id = "no_adapter"
name = "Missing adapter"

[[sources]]
id = "blank_name"
name = ""
adapter = "clay"

[[sources]]
id = "clay"
name = "Clay"
adapter = "clay"
"#;
        let definitions = SourceLoader::parse_str(contents).expect("parse list");
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].id.as_str(), "clay");
    }

    #[test]
    fn test_invalid_toml_file_is_error() {
        let result = SourceLoader::parse_str("[[sources]\nid = ");
        assert!(matches!(result, Err(SourceError::ParseError { .. })));
    }

    #[test]
    fn test_load_directory_skips_broken_files() {
        let tmp = TempDir::new().expect("create temp dir");
        let nested = tmp.path().join("extra");
        fs::create_dir(&nested).expect("create nested dir");

        fs::write(tmp.path().join("a.toml"), TWO_SOURCES).expect("write a.toml");
        fs::write(tmp.path().join("b.toml"), "not [valid").expect("write b.toml");
        fs::write(tmp.path().join("notes.txt"), "ignored").expect("write notes");
        fs::write(
            nested.join("c.toml"),
            "[[sources]]\nid = \"apollo\"\nname = \"Apollo\"\nadapter = \"clay\"\n",
        )
        .expect("write c.toml");

        let loader = SourceLoader::new(tmp.path()).expect("create loader");
        let definitions = loader.load_all().expect("load definitions");

        let ids: Vec<_> = definitions.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["clay", "internal_db", "apollo"]);
    }
}

//! Source and output boundaries.
//!
//! The compiler core only sees [`SourceUnit`]s and produces [`OutputUnit`]s.
//! Enumerating, reading and writing files happens here.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::DriverError;

pub const SOURCE_EXTENSION: &str = "jack";
pub const OUTPUT_EXTENSION: &str = "vm";

/// One class's source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceUnit {
    /// File name, such as `Main.jack`.
    pub name: String,
    pub text: String,
}

impl SourceUnit {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        SourceUnit {
            name: name.into(),
            text: text.into(),
        }
    }

    /// The class name: the file name without its extension.
    pub fn class_name(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    pub fn output_name(&self) -> String {
        format!("{}.{OUTPUT_EXTENSION}", self.class_name())
    }
}

/// One class's generated stack-machine text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputUnit {
    /// File name, such as `Main.vm`.
    pub name: String,
    pub text: String,
}

/// Supplies source units.
pub trait SourceStore {
    fn units(&self) -> Result<Vec<SourceUnit>, DriverError>;
}

/// Accepts output units.
pub trait OutputSink {
    fn write(&mut self, unit: &OutputUnit) -> Result<(), DriverError>;
}

/// Reads `*.jack` from a file or a directory and writes `<Class>.vm` files.
#[derive(Clone, Debug)]
pub struct DirectoryStore {
    input: PathBuf,
    out_dir: PathBuf,
}

impl DirectoryStore {
    /// `out_dir` defaults to the input directory, or the input file's parent.
    pub fn new(input: impl Into<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        let input = input.into();
        let out_dir = out_dir.unwrap_or_else(|| {
            if input.is_dir() {
                input.clone()
            } else {
                input
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default()
            }
        });
        DirectoryStore { input, out_dir }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn source_paths(&self) -> Result<Vec<PathBuf>, DriverError> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        let entries = fs::read_dir(&self.input).map_err(|source| DriverError::Io {
            path: self.input.clone(),
            source,
        })?;

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == SOURCE_EXTENSION))
            .collect();
        paths.sort();
        Ok(paths)
    }
}

impl SourceStore for DirectoryStore {
    fn units(&self) -> Result<Vec<SourceUnit>, DriverError> {
        let paths = self.source_paths()?;
        if paths.is_empty() {
            return Err(DriverError::NoSources(self.input.clone()));
        }

        paths
            .into_iter()
            .map(|path| {
                let text = fs::read_to_string(&path).map_err(|source| DriverError::Io {
                    path: path.clone(),
                    source,
                })?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!(unit = %name, bytes = text.len(), "read source");
                Ok(SourceUnit { name, text })
            })
            .collect()
    }
}

impl OutputSink for DirectoryStore {
    fn write(&mut self, unit: &OutputUnit) -> Result<(), DriverError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| DriverError::Io {
            path: self.out_dir.clone(),
            source,
        })?;
        let path = self.out_dir.join(&unit.name);
        fs::write(&path, &unit.text).map_err(|source| DriverError::Io { path, source })
    }
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub sources: Vec<SourceUnit>,
    pub outputs: Vec<OutputUnit>,
}

impl MemoryStore {
    pub fn new(sources: Vec<SourceUnit>) -> Self {
        MemoryStore {
            sources,
            outputs: Vec::new(),
        }
    }

    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.text.as_str())
    }
}

impl SourceStore for MemoryStore {
    fn units(&self) -> Result<Vec<SourceUnit>, DriverError> {
        Ok(self.sources.clone())
    }
}

impl OutputSink for MemoryStore {
    fn write(&mut self, unit: &OutputUnit) -> Result<(), DriverError> {
        self.outputs.push(unit.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn class_name_from_file_name() {
        let unit = SourceUnit::new("Main.jack", "");
        assert_eq!(unit.class_name(), "Main");
        assert_eq!(unit.output_name(), "Main.vm");
        assert_eq!(SourceUnit::new("Bare", "").class_name(), "Bare");
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new(vec![SourceUnit::new("A.jack", "class A {}")]);
        assert_eq!(store.units().map(|u| u.len()).ok(), Some(1));
        let written = store.write(&OutputUnit {
            name: "A.vm".into(),
            text: "return\n".into(),
        });
        assert!(written.is_ok());
        assert_eq!(store.output("A.vm"), Some("return\n"));
        assert_eq!(store.output("B.vm"), None);
    }
}

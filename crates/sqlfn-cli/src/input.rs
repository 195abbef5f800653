//! Input handling for file reading and stdin support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, Read};
use std::path::PathBuf;

/// The raw content of one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSource {
    pub name: String,
    pub content: String,
}

/// Read definition files, or stdin when no files are provided.
pub fn read_input(files: &[PathBuf]) -> Result<Vec<InputSource>> {
    if files.is_empty() {
        read_from_stdin()
    } else {
        read_from_files(files)
    }
}

fn read_from_stdin() -> Result<Vec<InputSource>> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;

    Ok(vec![InputSource {
        name: "<stdin>".to_string(),
        content,
    }])
}

fn read_from_files(files: &[PathBuf]) -> Result<Vec<InputSource>> {
    files
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;

            Ok(InputSource {
                name: path.display().to_string(),
                content,
            })
        })
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<serde_json::Value>),
    One(serde_json::Value),
}

impl InputSource {
    /// Splits the content into one JSON value per definition.
    ///
    /// Accepts a single object or an array of objects. Each value is decoded separately so
    /// that one bad definition does not hide the others.
    pub fn definitions(&self) -> serde_json::Result<Vec<serde_json::Value>> {
        match serde_json::from_str(&self.content)? {
            OneOrMany::Many(values) => Ok(values),
            OneOrMany::One(value) => Ok(vec![value]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source(content: &str) -> InputSource {
        InputSource {
            name: "test.json".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_read_single_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"name": "ns.f"}}"#).unwrap();

        let sources = read_from_files(&[file.path().to_path_buf()]).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].content.contains("ns.f"));
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_from_files(&[PathBuf::from("/nonexistent/functions.json")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_object() {
        let values = source(r#"{"name": "ns.f"}"#).definitions().unwrap();
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_array_of_objects() {
        let values = source(r#"[{"name": "ns.f"}, {"name": "ns.g"}, 3]"#)
            .definitions()
            .unwrap();
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_invalid_json() {
        assert!(source("{").definitions().is_err());
    }
}

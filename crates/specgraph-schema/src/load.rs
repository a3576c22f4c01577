//! Document I/O. The format is chosen by file extension only.

use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

///
/// LoadError
///

#[derive(Debug, ThisError)]
pub enum LoadError {
    #[error("unsupported document format '{}' (expected .json, .yaml or .yml)", path.display())]
    Format { path: PathBuf },

    #[error("i/o error at '{}': {error}", path.display())]
    Io {
        path: PathBuf,
        error: std::io::Error,
    },

    #[error("invalid json in '{}': {error}", path.display())]
    Json {
        path: PathBuf,
        error: serde_json::Error,
    },

    #[error("invalid yaml in '{}': {error}", path.display())]
    Yaml {
        path: PathBuf,
        error: serde_yaml::Error,
    },
}

///
/// Format
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Sniff the format from the path's extension.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LoadError::Format {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read and parse a document from disk.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).map_err(|error| LoadError::Io {
        path: path.to_path_buf(),
        error,
    })?;

    parse_document(path, &text, format)
}

/// Parse document text in the given format. `path` is only used for errors.
pub fn parse_document(path: &Path, text: &str, format: Format) -> Result<Value, LoadError> {
    match format {
        Format::Json => serde_json::from_str(text).map_err(|error| LoadError::Json {
            path: path.to_path_buf(),
            error,
        }),
        Format::Yaml => serde_yaml::from_str(text).map_err(|error| LoadError::Yaml {
            path: path.to_path_buf(),
            error,
        }),
    }
}

/// Serialize a document to disk, JSON pretty-printed or YAML by extension.
pub fn write_document(path: &Path, value: &Value) -> Result<(), LoadError> {
    let text = match Format::from_path(path)? {
        Format::Json => {
            let mut text =
                serde_json::to_string_pretty(value).map_err(|error| LoadError::Json {
                    path: path.to_path_buf(),
                    error,
                })?;
            text.push('\n');
            text
        }
        Format::Yaml => serde_yaml::to_string(value).map_err(|error| LoadError::Yaml {
            path: path.to_path_buf(),
            error,
        })?,
    };

    fs::write(path, text).map_err(|error| LoadError::Io {
        path: path.to_path_buf(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_is_sniffed_by_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")).ok(), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("a.YAML")).ok(), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.yml")).ok(), Some(Format::Yaml));
        assert!(matches!(
            Format::from_path(Path::new("a.txt")),
            Err(LoadError::Format { .. })
        ));
        assert!(matches!(
            Format::from_path(Path::new("noext")),
            Err(LoadError::Format { .. })
        ));
    }

    #[test]
    fn yaml_and_json_load_to_the_same_tree() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("doc.json");
        let yaml_path = dir.path().join("doc.yaml");

        fs::write(&json_path, r#"{"openapi":"3.0.0","info":{"title":"t"}}"#).expect("write");
        fs::write(&yaml_path, "openapi: 3.0.0\ninfo:\n  title: t\n").expect("write");

        let a = load_document(&json_path).expect("json loads");
        let b = load_document(&yaml_path).expect("yaml loads");

        assert_eq!(a, b);
    }

    #[test]
    fn write_then_load_preserves_key_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let value = json!({ "zeta": 1, "alpha": { "b": true, "a": "x" } });

        for name in ["out.json", "out.yml"] {
            let path = dir.path().join(name);
            write_document(&path, &value).expect("write");
            let back = load_document(&path).expect("load");

            assert_eq!(back, value, "{name} should round trip");
            let keys: Vec<_> = back.as_object().expect("object").keys().cloned().collect();
            assert_eq!(keys, ["zeta", "alpha"], "{name} should keep order");
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_document(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").expect("write");

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }
}

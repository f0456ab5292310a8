//! Writing fetched documents to disk and reading them back.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::Result;
use crate::documents::DocumentKind;

/// Path a document of `kind` is written to inside `dir`
#[must_use]
pub fn document_path(dir: &Path, kind: DocumentKind) -> PathBuf {
    dir.join(kind.file_name())
}

/// Write `document` as pretty JSON, replacing any earlier file for `kind`.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn save_document(dir: &Path, kind: DocumentKind, document: &Value) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = document_path(dir, kind);

    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!("Saved {} document to {}", kind, path.display());
    Ok(path)
}

/// Read a previously saved document
pub fn load_document(path: &Path) -> Result<Value> {
    debug!("Loading document from {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CinqueTerreError;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_directory_and_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("riomaggiore_data");
        let doc = json!({"metadata": {}, "restaurants": [{"rank": 1, "name": "Dau Cila"}]});

        let path = save_document(&dir, DocumentKind::Restaurants, &doc).unwrap();

        assert_eq!(path, dir.join("riomaggiore_restaurants.json"));
        assert_eq!(load_document(&path).unwrap(), doc);
    }

    #[test]
    fn test_save_overwrites_and_keeps_unicode() {
        let tmp = TempDir::new().unwrap();
        let first = json!({"metadata": {}, "current_conditions": {"summary": "old"}});
        let second = json!({"metadata": {}, "current_conditions": {"summary": "Più sole, 24°C"}});

        save_document(tmp.path(), DocumentKind::Weather, &first).unwrap();
        let path = save_document(tmp.path(), DocumentKind::Weather, &second).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Più sole, 24°C"));
        assert!(raw.contains("\n  \"current_conditions\""));
        assert_eq!(load_document(&path).unwrap(), second);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_document(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CinqueTerreError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, CinqueTerreError::JsonParse { .. }));
    }
}

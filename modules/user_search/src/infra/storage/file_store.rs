use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::contract::model::UserRecord;
use crate::domain::repo::RecordStore;
use crate::infra::storage::entity::UserRow;

/// Dataset encodings, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Yaml,
    Xml,
}

impl Format {
    fn for_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("xml") => Self::Xml,
            _ => Self::Json,
        }
    }
}

struct Snapshot {
    modified: Option<SystemTime>,
    len: u64,
    records: Arc<Vec<UserRecord>>,
}

/// Record store backed by a dataset file.
///
/// The file is read on every `load_all` so edits are picked up immediately.
/// With [`FileRecordStore::with_cache`] the parsed records are reused for as
/// long as the file's modification time and length are unchanged.
pub struct FileRecordStore {
    path: PathBuf,
    cache: Option<Mutex<Option<Snapshot>>>,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    pub fn with_cache(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Some(Mutex::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_records(&self) -> Result<Vec<UserRecord>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("failed to read dataset {}", self.path.display()))?;
        decode(&bytes, Format::for_path(&self.path))
            .with_context(|| format!("failed to parse dataset {}", self.path.display()))
    }

    fn cached(&self, modified: Option<SystemTime>, len: u64) -> Option<Arc<Vec<UserRecord>>> {
        let cache = self.cache.as_ref()?.lock();
        cache
            .as_ref()
            .filter(|s| s.modified.is_some() && s.modified == modified && s.len == len)
            .map(|s| s.records.clone())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn load_all(&self) -> Result<Arc<Vec<UserRecord>>> {
        if self.cache.is_none() {
            return Ok(Arc::new(self.read_records().await?));
        }

        let meta = tokio::fs::metadata(&self.path)
            .await
            .with_context(|| format!("failed to stat dataset {}", self.path.display()))?;
        let modified = meta.modified().ok();
        let len = meta.len();

        if let Some(records) = self.cached(modified, len) {
            trace!(path = %self.path.display(), "dataset cache hit");
            return Ok(records);
        }

        let records = Arc::new(self.read_records().await?);
        debug!(path = %self.path.display(), count = records.len(), "dataset loaded");

        if let Some(cache) = &self.cache {
            *cache.lock() = Some(Snapshot {
                modified,
                len,
                records: records.clone(),
            });
        }
        Ok(records)
    }
}

/// `<root><row>...</row>...</root>`; the root element name is not checked.
#[derive(Deserialize)]
struct XmlRows {
    #[serde(rename = "row", default)]
    rows: Vec<UserRow>,
}

fn decode(bytes: &[u8], format: Format) -> Result<Vec<UserRecord>> {
    let rows: Vec<UserRow> = match format {
        Format::Json => serde_json::from_slice(bytes)?,
        Format::Yaml => serde_yaml::from_slice(bytes)?,
        Format::Xml => {
            let text = std::str::from_utf8(bytes).context("dataset is not UTF-8")?;
            quick_xml::de::from_str::<XmlRows>(text)?.rows
        }
    };

    let mut seen = HashSet::with_capacity(rows.len());
    for row in &rows {
        if !seen.insert(row.id) {
            bail!("duplicate user id {}", row.id);
        }
    }

    Ok(rows.into_iter().map(UserRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    const DATASET: &str = r#"[
        {"id": 0, "age": 22, "first_name": "Boyd", "last_name": "Wolf", "about": "Nulla", "gender": "male"},
        {"id": 1, "age": 21, "first_name": "Hilda", "last_name": "Mayer", "about": "Sit", "gender": "female"}
    ]"#;

    fn file_with(suffix: &str, content: &str) -> NamedTempFile {
        let mut f = Builder::new().suffix(suffix).tempfile().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[tokio::test]
    async fn loads_json_in_file_order() {
        let f = file_with(".json", DATASET);
        let store = FileRecordStore::new(f.path());

        let records = store.load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[1].name(), "Hilda Mayer");
    }

    #[tokio::test]
    async fn loads_yaml_by_extension() {
        let yaml = "- id: 7\n  age: 30\n  first_name: Ann\n  last_name: Lee\n  about: yaml row\n  gender: female\n";
        let f = file_with(".yaml", yaml);

        let records = FileRecordStore::new(f.path()).load_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].about, "yaml row");
    }

    #[tokio::test]
    async fn loads_xml_by_extension() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<root>
  <row>
    <id>0</id>
    <guid>1a6fa827-62f1-45f6-b579-aaead2b47169</guid>
    <isActive>false</isActive>
    <age>22</age>
    <first_name>Boyd</first_name>
    <last_name>Wolf</last_name>
    <gender>male</gender>
    <about>Nulla cillum enim voluptate consequat laborum esse excepteur occaecat commodo nostrud excepteur ut cupidatat.
</about>
  </row>
  <row>
    <id>1</id>
    <age>21</age>
    <first_name>Hilda</first_name>
    <last_name>Mayer</last_name>
    <gender>female</gender>
    <about>Sit commodo consectetur minim amet ex.</about>
  </row>
</root>
"#;
        let f = file_with(".xml", xml);

        let records = FileRecordStore::new(f.path()).load_all().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 0);
        assert_eq!(records[0].name(), "Boyd Wolf");
        assert_eq!(records[0].age, 22);
        assert!(records[0].about.starts_with("Nulla cillum"));
        assert_eq!(records[1].gender, "female");
    }

    #[tokio::test]
    async fn xml_duplicate_ids_are_rejected() {
        let xml = "<root><row><id>4</id><age>1</age><first_name>A</first_name><last_name>B</last_name></row>\
                   <row><id>4</id><age>2</age><first_name>C</first_name><last_name>D</last_name></row></root>";
        let f = file_with(".xml", xml);
        let err = FileRecordStore::new(f.path()).load_all().await.unwrap_err();
        assert!(format!("{err:#}").contains("duplicate user id 4"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error_naming_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = FileRecordStore::new(&path).load_all().await.unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }

    #[tokio::test]
    async fn malformed_and_duplicate_datasets_are_rejected() {
        let f = file_with(".json", "{not json");
        assert!(FileRecordStore::new(f.path()).load_all().await.is_err());

        let dup = r#"[
            {"id": 1, "age": 1, "first_name": "A", "last_name": "B"},
            {"id": 1, "age": 2, "first_name": "C", "last_name": "D"}
        ]"#;
        let f = file_with(".json", dup);
        let err = FileRecordStore::new(f.path()).load_all().await.unwrap_err();
        assert!(format!("{err:#}").contains("duplicate user id 1"));
    }

    #[tokio::test]
    async fn uncached_store_sees_rewrites() {
        let f = file_with(".json", DATASET);
        let store = FileRecordStore::new(f.path());
        assert_eq!(store.load_all().await.unwrap().len(), 2);

        std::fs::write(f.path(), "[]").unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn cached_store_reuses_snapshot_until_file_changes() {
        let f = file_with(".json", DATASET);
        let store = FileRecordStore::with_cache(f.path());

        let first = store.load_all().await.unwrap();
        let second = store.load_all().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // different length invalidates even if the mtime resolution is coarse
        std::fs::write(f.path(), "[]").unwrap();
        assert!(store.load_all().await.unwrap().is_empty());
    }
}

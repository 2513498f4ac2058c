//! Document store seam and the in-memory store.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::document::{Document, SpecDocumentFilter, is_value_equal, normalize_extended_json};
use crate::spec::StoreError;

/// Read-only access to named document collections.
pub trait DocumentStore {
    /// Every document of `collection` matching `filter`, in stored order.
    ///
    /// Unknown collections are empty.
    fn find(
        &self,
        collection: &str,
        filter: &SpecDocumentFilter,
    ) -> Result<Vec<Document>, StoreError>;

    /// First matching document.
    fn find_one(
        &self,
        collection: &str,
        filter: &SpecDocumentFilter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.find(collection, filter)?.into_iter().next())
    }

    /// Distinct non-null values of `field` over matching documents, first-seen order.
    fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: &SpecDocumentFilter,
    ) -> Result<Vec<Value>, StoreError> {
        let mut l_values: Vec<Value> = Vec::new();
        for document in self.find(collection, filter)? {
            let Some(value) = document.get(field) else {
                continue;
            };
            if value.is_null() || l_values.iter().any(|seen| is_value_equal(seen, value)) {
                continue;
            }
            l_values.push(value.clone());
        }
        Ok(l_values)
    }
}

/// Collections held in memory, optionally loaded from a directory of
/// `<collection>.json` exports (one JSON array of documents per file).
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    dict_collections: HashMap<String, Vec<Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` file of `dir_store` as a collection named after its stem.
    pub fn from_dir(dir_store: &Path) -> Result<Self, StoreError> {
        let io_err = |path: &Path, source: std::io::Error| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut l_paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(dir_store).map_err(|e| io_err(dir_store, e))? {
            let path = entry.map_err(|e| io_err(dir_store, e))?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                l_paths.push(path);
            }
        }
        l_paths.sort();

        let mut store = Self::new();
        for path in l_paths {
            let Some(collection) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let c_text = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
            let payload: Value = serde_json::from_str(&c_text).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?;
            let l_documents = cast_collection_documents(collection, payload)?;
            debug!(
                "Loaded {} documents into collection '{collection}'.",
                l_documents.len()
            );
            store.insert_many(collection, l_documents);
        }

        info!(
            "Document store loaded from {} ({} collections).",
            dir_store.display(),
            store.dict_collections.len()
        );
        Ok(store)
    }

    /// Append documents to `collection`, normalising extended-JSON scalars.
    pub fn insert_many(&mut self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        let l_target = self
            .dict_collections
            .entry(collection.to_string())
            .or_default();
        for document in documents {
            if let Value::Object(normalized) = normalize_extended_json(Value::Object(document)) {
                l_target.push(normalized);
            }
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn find(
        &self,
        collection: &str,
        filter: &SpecDocumentFilter,
    ) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .dict_collections
            .get(collection)
            .map(|l_documents| {
                l_documents
                    .iter()
                    .filter(|document| filter.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn cast_collection_documents(collection: &str, payload: Value) -> Result<Vec<Document>, StoreError> {
    let malformed = |reason: String| StoreError::MalformedCollection {
        collection: collection.to_string(),
        reason,
    };

    let Value::Array(l_items) = payload else {
        return Err(malformed("expected a JSON array of documents".to_string()));
    };
    l_items
        .into_iter()
        .enumerate()
        .map(|(n_idx, item)| match item {
            Value::Object(document) => Ok(document),
            other => Err(malformed(format!(
                "item {n_idx} is not an object: {other}"
            ))),
        })
        .collect()
}

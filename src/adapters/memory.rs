use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process store keyed by collection name. Each collection is a `Vec`, so
/// insertion order falls out for free. Used by tests and `--in-memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<()> {
        let mut collections = self.collections.write().await;
        collections.entry(collection.to_string()).or_default().push(doc);
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        match docs.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => {
                doc.merge(&patch);
                Ok(Some(doc.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.retain(|doc| doc.id != id);
        }
        Ok(())
    }
}

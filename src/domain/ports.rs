use crate::domain::model::Document;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Storage port for the document collections. Implementations must preserve
/// insertion order in `fetch_all` and never reorder surviving documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Full snapshot of one collection. Unknown collections are empty, not
    /// errors.
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>>;

    async fn insert(&self, collection: &str, doc: Document) -> Result<()>;

    /// Merge-patches the document with the given id. Returns the updated
    /// document, or `None` when no such id exists.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>>;

    /// Idempotent: deleting an absent id is a no-op.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;
}

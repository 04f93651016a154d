use crate::domain::model::Document;
use crate::domain::ports::DocumentStore;
use crate::utils::error::{AnalyticsError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::sync::Mutex;

/// SQLite-backed document store. One table holds every collection; the free
/// form fields are serialized as a JSON blob per row. `seq` preserves
/// insertion order across restarts.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS documents (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                created_at TEXT NOT NULL,
                fields TEXT NOT NULL,
                UNIQUE (collection, id)
            );
            CREATE INDEX IF NOT EXISTS idx_documents_collection
                ON documents (collection);",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::new(":memory:")
    }
}

fn row_to_document(id: String, created_at: String, fields: String) -> Result<Document> {
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| AnalyticsError::processing(format!("bad createdAt in storage: {e}")))?
        .with_timezone(&Utc);
    let fields: Map<String, Value> = serde_json::from_str(&fields)?;
    Ok(Document {
        id,
        created_at,
        fields,
    })
}

fn encode_created_at(doc: &Document) -> String {
    doc.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<Document>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, created_at, fields FROM documents
             WHERE collection = ?1 ORDER BY seq ASC",
        )?;
        let rows = stmt
            .query_map([collection], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, created_at, fields)| row_to_document(id, created_at, fields))
            .collect()
    }

    async fn insert(&self, collection: &str, doc: Document) -> Result<()> {
        let fields = serde_json::to_string(&doc.fields)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO documents (collection, id, created_at, fields)
             VALUES (?1, ?2, ?3, ?4)",
            params![collection, doc.id, encode_created_at(&doc), fields],
        )?;
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<Document>> {
        let conn = self.conn.lock().unwrap();
        let existing = conn
            .query_row(
                "SELECT id, created_at, fields FROM documents
                 WHERE collection = ?1 AND id = ?2",
                [collection, id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, created_at, fields)) = existing else {
            return Ok(None);
        };
        let mut doc = row_to_document(id, created_at, fields)?;
        doc.merge(&patch);

        let fields = serde_json::to_string(&doc.fields)?;
        conn.execute(
            "UPDATE documents SET fields = ?1 WHERE collection = ?2 AND id = ?3",
            params![fields, collection, doc.id],
        )?;
        Ok(Some(doc))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            [collection, id],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(id: &str, body: Value) -> Document {
        Document {
            id: id.to_string(),
            created_at: Utc::now(),
            fields: body.as_object().cloned().unwrap(),
        }
    }

    #[tokio::test]
    async fn round_trips_documents_with_millisecond_timestamps() {
        let store = SqliteStore::in_memory().unwrap();
        let original = doc("a", json!({"name": "Acme", "amount": 12.5}));
        store.insert("orders", original.clone()).await.unwrap();

        let fetched = store.fetch_all("orders").await.unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].id, original.id);
        assert_eq!(fetched[0].fields, original.fields);
        // Storage keeps millisecond precision.
        assert_eq!(
            fetched[0].created_at.timestamp_millis(),
            original.created_at.timestamp_millis()
        );
    }

    #[tokio::test]
    async fn survives_reopen_and_keeps_insertion_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("analytics.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::new(path).unwrap();
            store.insert("leads", doc("first", json!({}))).await.unwrap();
            store.insert("leads", doc("second", json!({}))).await.unwrap();
        }

        let store = SqliteStore::new(path).unwrap();
        let docs = store.fetch_all("leads").await.unwrap();
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = SqliteStore::in_memory().unwrap();
        store.insert("leads", doc("a", json!({}))).await.unwrap();
        store.insert("orders", doc("b", json!({}))).await.unwrap();

        assert_eq!(store.fetch_all("leads").await.unwrap().len(), 1);
        assert_eq!(store.fetch_all("orders").await.unwrap().len(), 1);
        assert!(store.fetch_all("feedback").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_merges_and_persists() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .insert("customers", doc("c1", json!({"name": "Acme", "tier": "basic"})))
            .await
            .unwrap();

        let patch = json!({"tier": "gold"}).as_object().cloned().unwrap();
        let updated = store.update("customers", "c1", patch).await.unwrap().unwrap();
        assert_eq!(updated.field("tier"), Some(&json!("gold")));

        let fetched = store.fetch_all("customers").await.unwrap();
        assert_eq!(fetched[0].field("tier"), Some(&json!("gold")));
        assert_eq!(fetched[0].field("name"), Some(&json!("Acme")));
    }

    #[tokio::test]
    async fn update_of_missing_document_returns_none() {
        let store = SqliteStore::in_memory().unwrap();
        let patch = json!({"x": 1}).as_object().cloned().unwrap();
        assert!(store.update("leads", "nope", patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let store = SqliteStore::in_memory().unwrap();
        store.insert("leads", doc("a", json!({}))).await.unwrap();
        store.insert("leads", doc("b", json!({}))).await.unwrap();

        store.delete("leads", "a").await.unwrap();
        store.delete("leads", "a").await.unwrap();

        let docs = store.fetch_all("leads").await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "b");
    }
}

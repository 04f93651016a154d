use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use std::fmt::Write;

pub mod collections {
    pub const LEADS: &str = "leads";
    pub const CUSTOMERS: &str = "customers";
    pub const ORDERS: &str = "orders";
    pub const INVENTORY: &str = "inventory";
    pub const FEEDBACK: &str = "feedback";
}

/// A schemaless record in one of the document collections. Only the id and
/// creation time are first-class; everything else lives in `fields`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Builds a fresh document from a client-supplied body. The server stamps
    /// `createdAt`; a string `_id` in the body is honored, anything else gets
    /// a generated id.
    pub fn create(mut fields: Map<String, Value>) -> Self {
        fields.remove("createdAt");
        let id = match fields.remove("_id") {
            Some(Value::String(s)) => s,
            _ => new_document_id(),
        };
        Self {
            id,
            created_at: Utc::now(),
            fields,
        }
    }

    /// Flattens the document into a single JSON object with `_id` and
    /// `createdAt` merged alongside the free-form fields.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 2);
        map.insert("_id".to_string(), Value::String(self.id.clone()));
        map.insert(
            "createdAt".to_string(),
            Value::String(
                self.created_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        );
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Merge-patch semantics: every key in the patch replaces the same key in
    /// `fields`. `_id` and `createdAt` are server-managed and ignored.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            if key == "_id" || key == "createdAt" {
                continue;
            }
            self.fields.insert(key.clone(), value.clone());
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// 12 random bytes, hex-encoded, in the shape of the upstream object ids.
pub fn new_document_id() -> String {
    let bytes: [u8; 12] = rand::rng().random();
    bytes.iter().fold(String::with_capacity(24), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// Identifiers are opaque but arrive as either JSON strings or numbers;
/// comparisons happen on this canonical string form.
pub fn canonical_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read-only view of an order document with the aliased/optional money and
/// reference fields made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub customer_id: Option<String>,
    pub amount: Option<f64>,
    pub total_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<&Document> for OrderView {
    fn from(doc: &Document) -> Self {
        Self {
            customer_id: doc.field("customerId").and_then(canonical_id),
            amount: doc.field("amount").and_then(Value::as_f64),
            total_amount: doc.field("totalAmount").and_then(Value::as_f64),
            created_at: doc.created_at,
        }
    }
}

/// Read-only view of a feedback document. A missing or non-numeric score is
/// `None`, which lands the record in the passive bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackView {
    pub score: Option<f64>,
}

impl From<&Document> for FeedbackView {
    fn from(doc: &Document) -> Self {
        Self {
            score: doc.field("score").and_then(Value::as_f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn create_stamps_id_and_ignores_client_created_at() {
        let doc = Document::create(fields(json!({
            "name": "Acme",
            "createdAt": "1999-01-01T00:00:00Z"
        })));

        assert_eq!(doc.id.len(), 24);
        assert!(!doc.fields.contains_key("createdAt"));
        assert_eq!(doc.field("name"), Some(&json!("Acme")));
    }

    #[test]
    fn create_honors_string_id_from_body() {
        let doc = Document::create(fields(json!({"_id": "abc123", "x": 1})));
        assert_eq!(doc.id, "abc123");
        assert!(!doc.fields.contains_key("_id"));
    }

    #[test]
    fn to_json_flattens_id_and_created_at() {
        let doc = Document::create(fields(json!({"status": "new"})));
        let value = doc.to_json();

        assert_eq!(value["_id"], json!(doc.id));
        assert_eq!(value["status"], json!("new"));
        assert!(value["createdAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn merge_replaces_fields_but_not_server_keys() {
        let mut doc = Document::create(fields(json!({"status": "new", "owner": "a"})));
        let original_id = doc.id.clone();
        let original_created = doc.created_at;

        doc.merge(&fields(json!({
            "status": "won",
            "_id": "hijack",
            "createdAt": "1999-01-01T00:00:00Z"
        })));

        assert_eq!(doc.id, original_id);
        assert_eq!(doc.created_at, original_created);
        assert_eq!(doc.field("status"), Some(&json!("won")));
        assert_eq!(doc.field("owner"), Some(&json!("a")));
    }

    #[test]
    fn canonical_id_accepts_strings_and_numbers() {
        assert_eq!(canonical_id(&json!("cust-1")), Some("cust-1".to_string()));
        assert_eq!(canonical_id(&json!(42)), Some("42".to_string()));
        assert_eq!(canonical_id(&json!(null)), None);
        assert_eq!(canonical_id(&json!(["x"])), None);
    }

    #[test]
    fn order_view_reads_aliased_amount_fields() {
        let doc = Document::create(fields(json!({
            "customerId": 7,
            "amount": 50,
            "totalAmount": 80.5
        })));
        let view = OrderView::from(&doc);

        assert_eq!(view.customer_id.as_deref(), Some("7"));
        assert_eq!(view.amount, Some(50.0));
        assert_eq!(view.total_amount, Some(80.5));
    }
}

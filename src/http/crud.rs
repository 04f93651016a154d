use crate::domain::model::Document;
use crate::http::error::ApiError;
use crate::http::AppState;
use crate::utils::error::AnalyticsError;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Map, Value};

/// One CRUD-exposed collection: storage name (also the plural response key),
/// the singular response key, and the noun used in messages.
#[derive(Debug, Clone, Copy)]
pub struct Collection {
    pub name: &'static str,
    pub singular: &'static str,
    pub noun: &'static str,
}

pub const COLLECTIONS: [Collection; 4] = [
    Collection {
        name: "leads",
        singular: "lead",
        noun: "Lead",
    },
    Collection {
        name: "customers",
        singular: "customer",
        noun: "Customer",
    },
    Collection {
        name: "orders",
        singular: "order",
        noun: "Order",
    },
    Collection {
        name: "inventory",
        singular: "item",
        noun: "Item",
    },
];

impl Collection {
    // The feedback collection is engine-readable only; it has no CRUD routes.
    fn lookup(name: &str) -> Result<Self, ApiError> {
        COLLECTIONS
            .iter()
            .find(|coll| coll.name == name)
            .copied()
            .ok_or_else(|| AnalyticsError::not_found("Collection").into())
    }
}

fn body_fields(body: Value) -> Map<String, Value> {
    body.as_object().cloned().unwrap_or_default()
}

pub async fn list_documents(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let coll = Collection::lookup(&collection)?;
    let docs = state.store.fetch_all(coll.name).await?;
    let docs: Vec<Value> = docs.iter().map(Document::to_json).collect();
    Ok(Json(json!({ (coll.name): docs })))
}

pub async fn create_document(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let coll = Collection::lookup(&collection)?;
    let doc = Document::create(body_fields(body));
    state.store.insert(coll.name, doc.clone()).await?;
    tracing::debug!(collection = coll.name, id = %doc.id, "document created");
    Ok(Json(json!({
        "message": format!("{} added", coll.noun),
        (coll.singular): doc.to_json(),
    })))
}

pub async fn update_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let coll = Collection::lookup(&collection)?;
    let updated = state.store.update(coll.name, &id, body_fields(body)).await?;
    let doc = updated.ok_or_else(|| AnalyticsError::not_found(coll.noun))?;
    Ok(Json(json!({
        "message": format!("{} updated", coll.noun),
        (coll.singular): doc.to_json(),
    })))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let coll = Collection::lookup(&collection)?;
    state.store.delete(coll.name, &id).await?;
    Ok(Json(json!({ "message": format!("{} deleted", coll.noun) })))
}

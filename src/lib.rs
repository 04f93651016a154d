pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use crate::adapters::{MemoryStore, SqliteStore};
pub use crate::config::ServerConfig;
pub use crate::core::MetricsEngine;
pub use crate::domain::model::Document;
pub use crate::domain::ports::DocumentStore;
pub use crate::http::{build_router, AppState};
pub use crate::utils::error::{AnalyticsError, Result};

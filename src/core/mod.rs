pub mod clv;
pub mod engine;
pub mod nps;
pub mod rfm;

pub use crate::domain::model::Document;
pub use crate::domain::ports::DocumentStore;
pub use crate::utils::error::Result;
pub use clv::{compute_clv, ClvRecord};
pub use engine::MetricsEngine;
pub use nps::{compute_nps, NpsReport};
pub use rfm::{compute_rfm, RfmReport};

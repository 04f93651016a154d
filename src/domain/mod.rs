// Domain layer: document model and storage port. No HTTP or SQLite in here.

pub mod model;
pub mod ports;

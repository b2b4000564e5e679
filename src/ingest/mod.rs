//! Tabular instance ingestion: CSV records for clients, vehicles, the depot
//! and scalar parameters, plus assembly into an [`Instance`](crate::domain::Instance).

pub mod loader;
pub mod records;

pub use loader::{load_instance, InstanceFiles};

//! Infrastructure layer: entity storage behind a transactional boundary.

pub mod store;

pub use store::{CascadeSummary, EntityStore, InMemoryEntityStore, ItemFilter, StoreError, StoreResult};

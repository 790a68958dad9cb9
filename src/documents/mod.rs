//! Document projection: MongoDB shapes, projector, and writer
//!
//! The projector is pure (snapshot in, BSON batches out); the store replaces
//! each collection's contents wholesale so runs stay idempotent.

pub mod projector;
pub mod schemas;
pub mod store;

pub use projector::{project_all, CollectionBatch};
pub use store::DocumentStore;

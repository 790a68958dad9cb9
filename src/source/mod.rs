//! Relational source: entity models, reader, and the in-memory snapshot

pub mod entity;
pub mod reader;
pub mod snapshot;

pub use reader::SqlSource;
pub use snapshot::Snapshot;

#[cfg(test)]
pub mod fixtures;

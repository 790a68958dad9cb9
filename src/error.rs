//! Error types for lorebridge
//!
//! Fatal errors abort a run before any target mutation; row-level failures
//! never surface here, they are collected into the run summary instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    /// Invalid or incomplete configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Relational source unreachable or unreadable
    #[error("relational source error: {0}")]
    Source(String),

    /// MongoDB connection or write failure
    #[error("document store error: {0}")]
    DocumentStore(String),

    /// Neo4j connection or query failure
    #[error("graph store error: {0}")]
    GraphStore(String),

    /// Failure converting a projected document to BSON
    #[error("projection error: {0}")]
    Projection(String),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

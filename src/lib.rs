//! lorebridge - projects the RPG relational store into MongoDB and Neo4j
//!
//! A batch pipeline with four parts, leaves first:
//!
//! - **source**: read-only snapshot of the MySQL system of record
//! - **documents**: curated denormalization into MongoDB collections
//! - **graph**: labeled nodes and typed directed edges in Neo4j
//! - **migrate**: the orchestrator that sequences a full idempotent run
//!
//! Every run rebuilds both targets from scratch; re-running against an
//! unchanged source converges on the same target state.

pub mod config;
pub mod documents;
pub mod error;
pub mod graph;
pub mod migrate;
pub mod progression;
pub mod source;

pub use config::Args;
pub use error::{BridgeError, Result};
pub use migrate::{Migration, RunState, RunSummary};

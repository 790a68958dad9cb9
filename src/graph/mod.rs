//! Graph projection: node/edge planning and the Neo4j writer
//!
//! The plan is pure (snapshot in, node and edge specs out); the store wipes
//! the whole graph and rebuilds it with MERGE semantics in two strictly
//! ordered passes.

pub mod plan;
pub mod store;

pub use plan::{plan, EdgeSpec, GraphPlan, NodeSpec, PropValue, LABELS};
pub use store::GraphStore;

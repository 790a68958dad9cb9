//! Migration orchestrator
//!
//! Sequences a full run: connectivity preflight (fail fast before any target
//! mutation), snapshot load, graph wipe, concurrent document and graph-node
//! projection, relationship linking, and the summary report.
//!
//! ```text
//! NotStarted
//!   -> VerifyingSourceConnectivity   (SQL connect + snapshot; Failed on error)
//!   -> VerifyingTargetConnectivity   (MongoDB + Neo4j; Failed on error)
//!   -> Clearing                      (graph wipe + constraints)
//!   -> Projecting                    (documents || graph nodes, concurrent)
//!   -> LinkingRelationships          (graph edges, after the node barrier)
//!   -> Reporting
//!   -> Done
//! ```
//!
//! Once projection begins, failures are isolated per row or per collection
//! and accumulated into the summary; only the two verifying states can end
//! the run in `Failed`.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Args;
use crate::documents::{self, DocumentStore};
use crate::error::Result;
use crate::graph::{self, GraphStore};
use crate::source::SqlSource;

/// Orchestrator state, advanced strictly forward during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    VerifyingSourceConnectivity,
    VerifyingTargetConnectivity,
    Clearing,
    Projecting,
    LinkingRelationships,
    Reporting,
    Done,
    Failed(String),
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::NotStarted => write!(f, "not_started"),
            RunState::VerifyingSourceConnectivity => write!(f, "verifying_source_connectivity"),
            RunState::VerifyingTargetConnectivity => write!(f, "verifying_target_connectivity"),
            RunState::Clearing => write!(f, "clearing"),
            RunState::Projecting => write!(f, "projecting"),
            RunState::LinkingRelationships => write!(f, "linking_relationships"),
            RunState::Reporting => write!(f, "reporting"),
            RunState::Done => write!(f, "done"),
            RunState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Outcome of one full run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Documents migrated per collection (one collection per entity type)
    pub per_entity_counts: BTreeMap<String, usize>,
    /// Graph relationships created
    pub relationship_count: usize,
    /// Non-fatal per-row and per-collection errors
    pub errors: Vec<String>,
}

/// One migration run over explicit, run-scoped store handles
pub struct Migration {
    args: Args,
    state: RunState,
}

impl Migration {
    pub fn new(args: Args) -> Self {
        Self {
            args,
            state: RunState::NotStarted,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    fn advance(&mut self, next: RunState) {
        info!(from = %self.state, to = %next, "Run state");
        self.state = next;
    }

    /// Execute the full pipeline
    ///
    /// Fatal errors abort before any target mutation; everything after the
    /// preflight is best-effort with per-row isolation.
    pub async fn run(&mut self) -> Result<RunSummary> {
        // Preflight: the relational source must be reachable and readable
        // before either target is touched.
        self.advance(RunState::VerifyingSourceConnectivity);
        let snapshot = match async {
            let source = SqlSource::connect(&self.args.sql).await?;
            source.snapshot().await
        }
        .await
        {
            Ok(snap) => snap,
            Err(e) => {
                self.state = RunState::Failed(e.to_string());
                return Err(e);
            }
        };

        self.advance(RunState::VerifyingTargetConnectivity);
        let (mongo, neo4j) = match async {
            let mongo = DocumentStore::connect(&self.args.mongo_uri, &self.args.mongo_db).await?;
            let neo4j = GraphStore::connect(
                &self.args.neo4j_uri,
                &self.args.neo4j_user,
                &self.args.neo4j_password,
            )
            .await?;
            Ok::<_, crate::error::BridgeError>((mongo, neo4j))
        }
        .await
        {
            Ok(stores) => stores,
            Err(e) => {
                self.state = RunState::Failed(e.to_string());
                return Err(e);
            }
        };

        // Graph wipe up front; each MongoDB collection is cleared as it is
        // replaced. Constraint failures are idempotence aids only.
        self.advance(RunState::Clearing);
        neo4j.clear().await?;
        neo4j.ensure_constraints(&graph::LABELS).await;

        // Both projectors read the same immutable snapshot and write to
        // disjoint targets, so they run concurrently. The graph edge pass
        // stays behind the node barrier.
        self.advance(RunState::Projecting);
        let batches = documents::project_all(&snapshot)?;
        let plan = graph::plan(&snapshot);

        let mut doc_errors = Vec::new();
        let mut graph_errors = Vec::new();
        let (counts, nodes_created) = tokio::join!(
            mongo.write_batches(&batches, &mut doc_errors),
            neo4j.create_nodes(&plan.nodes, &mut graph_errors),
        );
        info!(nodes = nodes_created, "Node pass complete, linking relationships");

        self.advance(RunState::LinkingRelationships);
        let relationship_count = neo4j.link_relationships(&plan.edges, &mut graph_errors).await;

        self.advance(RunState::Reporting);
        let mut errors = doc_errors;
        errors.extend(graph_errors);
        for skipped in &plan.dangling {
            warn!("{}", skipped);
            errors.push(skipped.clone());
        }

        let summary = RunSummary {
            per_entity_counts: counts
                .into_iter()
                .map(|(name, n)| (name.to_string(), n))
                .collect(),
            relationship_count,
            errors,
        };

        self.advance(RunState::Done);
        Ok(summary)
    }
}

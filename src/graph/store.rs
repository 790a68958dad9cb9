//! Neo4j target store
//!
//! Applies a [`GraphPlan`] over bolt: full-graph wipe, per-label uniqueness
//! constraints on `sql_id`, then MERGE-based node and edge creation. Node
//! creation completes for every entity type before any edge is attempted;
//! per-row failures are isolated and collected, never fatal.

use neo4rs::{
    query, BoltBoolean, BoltFloat, BoltInteger, BoltMap, BoltNull, BoltString, BoltType, Graph,
};
use tracing::{info, warn};

use crate::error::{BridgeError, Result};
use crate::graph::plan::{EdgeSpec, NodeSpec, PropValue};

/// Handle on the graph target, scoped to a single run
pub struct GraphStore {
    graph: Graph,
}

impl GraphStore {
    /// Connect and verify the target is reachable and credentials are valid
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        info!("Connecting to Neo4j at {} as {}", uri, user);

        let graph = Graph::new(uri, user, password).await.map_err(|e| {
            BridgeError::GraphStore(format!(
                "failed to connect to Neo4j at {}: {}\nCheck NEO4J_URI and that the server is running.",
                uri, e
            ))
        })?;

        // A trivial query verifies both connectivity and authentication
        graph.run(query("RETURN 1")).await.map_err(|e| {
            BridgeError::GraphStore(format!(
                "Neo4j authentication or connectivity check failed: {}\n\
                 Check that NEO4J_USER / NEO4J_PASSWORD are correct.\n\
                 If Neo4j runs in Docker, use the password given to NEO4J_AUTH, e.g. -e NEO4J_AUTH=neo4j/yourpassword",
                e
            ))
        })?;

        info!("Neo4j connection established");
        Ok(Self { graph })
    }

    /// Remove every node and relationship so the run rebuilds from scratch
    pub async fn clear(&self) -> Result<()> {
        info!("Clearing existing graph data (MATCH (n) DETACH DELETE n)");
        self.graph
            .run(query("MATCH (n) DETACH DELETE n"))
            .await
            .map_err(|e| BridgeError::GraphStore(format!("failed to clear graph: {}", e)))
    }

    /// Create uniqueness constraints on (label, sql_id) for each label
    ///
    /// Failures are logged and ignored: constraints make re-runs safe but
    /// are not a correctness requirement.
    pub async fn ensure_constraints(&self, labels: &[&str]) {
        info!("Ensuring sql_id uniqueness constraints for {} labels", labels.len());
        for label in labels {
            let cypher = format!(
                "CREATE CONSTRAINT IF NOT EXISTS FOR (n:{}) REQUIRE n.sql_id IS UNIQUE",
                label
            );
            if let Err(e) = self.graph.run(query(&cypher)).await {
                warn!(label = label, error = %e, "Constraint setup failed, continuing");
            }
        }
    }

    /// Node pass: merge one node per planned entity, isolating per-row failures
    pub async fn create_nodes(&self, nodes: &[NodeSpec], errors: &mut Vec<String>) -> usize {
        let mut created = 0;
        for node in nodes {
            let cypher = format!("MERGE (n:{} {{sql_id: $sql_id}}) SET n += $props", node.label);
            let q = query(&cypher)
                .param("sql_id", node.sql_id)
                .param("props", BoltType::Map(bolt_props(&node.props)));

            match self.graph.run(q).await {
                Ok(()) => created += 1,
                Err(e) => {
                    warn!(label = node.label, sql_id = node.sql_id, error = %e, "Node creation failed");
                    errors.push(format!("node {}({}): {}", node.label, node.sql_id, e));
                }
            }
        }
        info!(created = created, "Graph node pass complete");
        created
    }

    /// Edge pass: merge one directed edge per planned relationship, never duplicating
    ///
    /// Must only run after the node pass has completed for all entity types.
    pub async fn link_relationships(&self, edges: &[EdgeSpec], errors: &mut Vec<String>) -> usize {
        let mut created = 0;
        for edge in edges {
            let cypher = format!(
                "MATCH (a:{} {{sql_id: $a_id}}), (b:{} {{sql_id: $b_id}}) MERGE (a)-[r:{}]->(b)",
                edge.src_label, edge.dst_label, edge.rel
            );
            let q = query(&cypher)
                .param("a_id", edge.src_id)
                .param("b_id", edge.dst_id);

            match self.graph.run(q).await {
                Ok(()) => created += 1,
                Err(e) => {
                    warn!(
                        rel = edge.rel,
                        src = edge.src_id,
                        dst = edge.dst_id,
                        error = %e,
                        "Edge creation failed"
                    );
                    errors.push(format!(
                        "edge {}({}) -[{}]-> {}({}): {}",
                        edge.src_label, edge.src_id, edge.rel, edge.dst_label, edge.dst_id, e
                    ));
                }
            }
        }
        info!(created = created, "Graph relationship pass complete");
        created
    }
}

fn bolt_props(props: &[(&'static str, PropValue)]) -> BoltMap {
    let mut map = BoltMap::default();
    for (key, value) in props {
        map.put(BoltString::from(*key), bolt_value(value));
    }
    map
}

fn bolt_value(value: &PropValue) -> BoltType {
    match value {
        PropValue::Int(v) => BoltType::Integer(BoltInteger::new(*v)),
        PropValue::Float(v) => BoltType::Float(BoltFloat::new(*v)),
        PropValue::Text(v) => BoltType::String(BoltString::from(v.as_str())),
        PropValue::Bool(v) => BoltType::Boolean(BoltBoolean::new(*v)),
        PropValue::Null => BoltType::Null(BoltNull),
    }
}

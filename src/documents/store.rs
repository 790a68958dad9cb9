//! MongoDB target store
//!
//! Thin wrapper over the driver with connection verification and the
//! replace-collection write path. Each run drops a collection and re-inserts
//! its full contents, which keeps repeated runs convergent.

use bson::{doc, Document};
use mongodb::Client;
use tracing::{info, warn};

use crate::documents::projector::CollectionBatch;
use crate::error::{BridgeError, Result};

/// Handle on the document target, scoped to a single run
#[derive(Clone)]
pub struct DocumentStore {
    client: Client,
    db_name: String,
}

impl DocumentStore {
    /// Connect and verify the target is reachable
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        // serverSelectionTimeoutMS keeps us from hanging on an unreachable server
        let timeout_uri = if uri.contains('?') {
            format!("{}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        } else {
            format!("{}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000", uri)
        };

        let client = Client::with_uri_str(&timeout_uri).await.map_err(|e| {
            BridgeError::DocumentStore(format!(
                "failed to connect to MongoDB at {}: {}\nCheck MONGO_URI and that the server is running.",
                uri, e
            ))
        })?;

        client
            .database(db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| {
                BridgeError::DocumentStore(format!(
                    "MongoDB ping failed for {}: {}\nCheck MONGO_URI / MONGO_DB and server credentials.",
                    uri, e
                ))
            })?;

        info!("Connected to MongoDB database '{}'", db_name);
        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Drop a collection and insert its replacement contents in order
    pub async fn replace_collection(&self, name: &str, documents: &[Document]) -> Result<usize> {
        let collection = self
            .client
            .database(&self.db_name)
            .collection::<Document>(name);

        collection.drop().await.map_err(|e| {
            BridgeError::DocumentStore(format!("failed to drop collection {}: {}", name, e))
        })?;

        if !documents.is_empty() {
            collection.insert_many(documents.to_vec()).await.map_err(|e| {
                BridgeError::DocumentStore(format!("failed to insert into {}: {}", name, e))
            })?;
        }

        info!(collection = name, count = documents.len(), "Collection replaced");
        Ok(documents.len())
    }

    /// Write every batch, isolating per-collection failures
    ///
    /// Returns per-collection insert counts; failures are recorded and do
    /// not stop the remaining collections.
    pub async fn write_batches(
        &self,
        batches: &[CollectionBatch],
        errors: &mut Vec<String>,
    ) -> Vec<(&'static str, usize)> {
        let mut counts = Vec::with_capacity(batches.len());
        for batch in batches {
            match self.replace_collection(batch.name, &batch.documents).await {
                Ok(n) => counts.push((batch.name, n)),
                Err(e) => {
                    warn!(collection = batch.name, error = %e, "Collection write failed");
                    errors.push(format!("collection {}: {}", batch.name, e));
                    counts.push((batch.name, 0));
                }
            }
        }
        counts
    }
}

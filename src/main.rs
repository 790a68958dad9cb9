//! lorebridge - batch migration of RPG data into MongoDB and Neo4j

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lorebridge::{Args, Migration};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lorebridge={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  lorebridge - RPG store migration");
    info!("======================================");
    info!("SQL source: {}:{}/{}", args.sql.sql_host, args.sql.sql_port, args.sql.sql_name);
    info!("MongoDB: {} (db: {})", args.mongo_uri, args.mongo_db);
    info!("Neo4j: {} (user: {})", args.neo4j_uri, args.neo4j_user);
    info!("======================================");

    let mut migration = Migration::new(args);
    let summary = match migration.run().await {
        Ok(summary) => summary,
        Err(e) => {
            error!("Migration aborted: {}", e);
            std::process::exit(1);
        }
    };

    info!("Migration completed");
    for (entity, count) in &summary.per_entity_counts {
        info!("  {} migrated: {}", entity, count);
    }
    info!("  relationships created: {}", summary.relationship_count);
    if summary.errors.is_empty() {
        info!("  no row-level errors");
    } else {
        warn!("  {} row-level error(s):", summary.errors.len());
        for err in &summary.errors {
            warn!("    {}", err);
        }
    }
    info!("summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}

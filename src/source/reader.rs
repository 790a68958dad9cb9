//! Relational source reader
//!
//! Opens a read-only connection to the MySQL system of record and loads the
//! full entity set into a [`Snapshot`]. Connection failures surface as
//! actionable diagnostics before any target store is touched.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityName, EntityTrait, QueryOrder};
use tracing::{debug, info};

use crate::config::SqlArgs;
use crate::error::{BridgeError, Result};
use crate::source::entity::{
    battle, character, character_quest, character_skill, guild, inventory, inventory_item, item,
    npc, quest, skill, transaction, user,
};
use crate::source::Snapshot;

/// Handle on the relational source, scoped to a single run
pub struct SqlSource {
    conn: DatabaseConnection,
}

impl SqlSource {
    /// Connect and verify the source is reachable
    pub async fn connect(args: &SqlArgs) -> Result<Self> {
        let url = args.url();
        info!("Connecting to relational source: {}", mask_connection_string(&url));

        let mut opt = ConnectOptions::new(&url);
        opt.max_connections(4)
            .connect_timeout(Duration::from_secs(5))
            .sqlx_logging(false);

        let conn = Database::connect(opt)
            .await
            .map_err(|e| source_unreachable(&url, &e))?;
        conn.ping().await.map_err(|e| source_unreachable(&url, &e))?;

        info!("Relational source connection established");
        Ok(Self { conn })
    }

    /// Materialize every table, rows ordered by primary key
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let snap = Snapshot {
            users: self.load::<user::Entity>(user::Column::Id).await?,
            guilds: self.load::<guild::Entity>(guild::Column::Id).await?,
            characters: self.load::<character::Entity>(character::Column::Id).await?,
            items: self.load::<item::Entity>(item::Column::Id).await?,
            skills: self.load::<skill::Entity>(skill::Column::Id).await?,
            npcs: self.load::<npc::Entity>(npc::Column::Id).await?,
            quests: self.load::<quest::Entity>(quest::Column::Id).await?,
            inventories: self.load::<inventory::Entity>(inventory::Column::Id).await?,
            inventory_items: self
                .load::<inventory_item::Entity>(inventory_item::Column::Id)
                .await?,
            battles: self.load::<battle::Entity>(battle::Column::Id).await?,
            transactions: self.load::<transaction::Entity>(transaction::Column::Id).await?,
            character_skills: self
                .load::<character_skill::Entity>(character_skill::Column::Id)
                .await?,
            character_quests: self
                .load::<character_quest::Entity>(character_quest::Column::Id)
                .await?,
        };

        info!(
            users = snap.users.len(),
            guilds = snap.guilds.len(),
            characters = snap.characters.len(),
            items = snap.items.len(),
            skills = snap.skills.len(),
            npcs = snap.npcs.len(),
            quests = snap.quests.len(),
            inventories = snap.inventories.len(),
            inventory_items = snap.inventory_items.len(),
            battles = snap.battles.len(),
            transactions = snap.transactions.len(),
            "Relational snapshot loaded"
        );
        Ok(snap)
    }

    async fn load<E>(&self, order: E::Column) -> Result<Vec<E::Model>>
    where
        E: EntityTrait,
    {
        debug!("Loading {}", E::default().table_name());
        E::find()
            .order_by_asc(order)
            .all(&self.conn)
            .await
            .map_err(|e| {
                BridgeError::Source(format!(
                    "failed to read table {}: {}",
                    E::default().table_name(),
                    e
                ))
            })
    }
}

fn source_unreachable(url: &str, err: &sea_orm::DbErr) -> BridgeError {
    BridgeError::Source(format!(
        "cannot reach the SQL database at {}: {}\n\
         Common fixes:\n\
         - verify SQL_HOST / SQL_PORT / SQL_USER / SQL_PASSWORD / SQL_NAME (or SQL_URL)\n\
         - ensure the SQL user exists and has privileges for this host (localhost vs 127.0.0.1)\n\
         - test with the mysql client: mysql -u USER -p -h HOST -P PORT",
        mask_connection_string(url),
        err
    ))
}

/// Mask credentials in a connection URL before it reaches the log
fn mask_connection_string(url: &str) -> String {
    if let (Some(scheme_end), Some(at)) = (url.find("//"), url.rfind('@')) {
        if at > scheme_end {
            return format!("{}****{}", &url[..scheme_end + 2], &url[at..]);
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::mask_connection_string;

    #[test]
    fn masks_credentials() {
        assert_eq!(
            mask_connection_string("mysql://rpg:secret@db:3306/rpg"),
            "mysql://****@db:3306/rpg"
        );
    }

    #[test]
    fn leaves_urls_without_credentials_alone() {
        assert_eq!(
            mask_connection_string("mysql://db:3306/rpg"),
            "mysql://db:3306/rpg"
        );
    }
}

//! Document projector
//!
//! Pure transformation from the relational snapshot into per-collection BSON
//! batches. Embedding decisions are curated per entity type: quests carry
//! their NPC, guilds carry member names, users carry transactions and
//! character refs, and characters carry everything a single read needs.
//! No I/O happens here; the writer replaces collection contents afterwards.

use bson::Document;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{BridgeError, Result};
use crate::source::entity::{
    battle, character, guild, inventory, item, npc, quest, skill, transaction, user,
};
use crate::source::Snapshot;

use super::schemas::{
    BattleDoc, CharacterDoc, CharacterRef, GuildDoc, GuildRef, InventoryDoc, InventoryEntry,
    ItemDoc, NpcDoc, QuestDoc, SkillDoc, TransactionDoc, UserDoc, UserRef,
};

/// A named collection and its full replacement contents
#[derive(Debug, Clone)]
pub struct CollectionBatch {
    pub name: &'static str,
    pub documents: Vec<Document>,
}

/// Canonical textual form for source timestamps
fn iso(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ----------------------------------------------------------------------
// Per-entity projections
// ----------------------------------------------------------------------

pub fn item_doc(row: &item::Model) -> ItemDoc {
    ItemDoc {
        id: row.id,
        name: row.name.clone(),
        kind: row.kind.clone(),
        rarity: row.rarity.clone(),
        value: row.value,
        stats: row.stats.clone(),
    }
}

pub fn skill_doc(row: &skill::Model) -> SkillDoc {
    SkillDoc {
        id: row.id,
        name: row.name.clone(),
        description: row.description.clone(),
        damage: row.damage,
        healing: row.healing,
    }
}

pub fn npc_doc(row: &npc::Model) -> NpcDoc {
    NpcDoc {
        id: row.id,
        name: row.name.clone(),
        role: row.role.clone(),
        location: row.location.clone(),
    }
}

/// Quest with its NPC embedded; a dangling NPC reference projects as null
pub fn quest_doc(snap: &Snapshot, row: &quest::Model) -> QuestDoc {
    QuestDoc {
        id: row.id,
        title: row.title.clone(),
        description: row.description.clone(),
        reward_money: row.reward_money,
        reward_xp: row.reward_xp,
        status: row.status.clone(),
        completed_at: row.completed_at.as_ref().map(iso),
        npc: snap.npc(row.npc_id).map(npc_doc),
    }
}

pub fn battle_doc(row: &battle::Model) -> BattleDoc {
    BattleDoc {
        id: row.id,
        character_id: row.character_id,
        xp: row.xp,
        money: row.money,
        outcome: row.outcome.clone(),
    }
}

/// Guild with the member character names denormalized in
pub fn guild_doc(snap: &Snapshot, row: &guild::Model) -> GuildDoc {
    GuildDoc {
        id: row.id,
        guild_name: row.guild_name.clone(),
        members: snap
            .members_of(row.id)
            .iter()
            .map(|c| c.character_name.clone())
            .collect(),
    }
}

pub fn transaction_doc(row: &transaction::Model) -> TransactionDoc {
    TransactionDoc {
        id: row.id,
        user_id: row.user_id,
        item_id: row.item_id,
        quantity: row.quantity,
        cost: row.cost,
    }
}

/// User with embedded transactions and lightweight character refs
pub fn user_doc(snap: &Snapshot, row: &user::Model) -> UserDoc {
    UserDoc {
        id: row.id,
        username: row.username.clone(),
        email: row.email.clone(),
        is_staff: row.is_staff,
        is_superuser: row.is_superuser,
        date_joined: iso(&row.date_joined),
        last_login: row.last_login.as_ref().map(iso),
        transactions: snap
            .transactions_of(row.id)
            .into_iter()
            .map(transaction_doc)
            .collect(),
        characters: snap
            .characters_of(row.id)
            .into_iter()
            .map(|c| CharacterRef {
                id: c.id,
                character_name: c.character_name.clone(),
                level: c.level,
            })
            .collect(),
    }
}

/// Character with inventory, skills, quests, battles, and owner summaries
///
/// Inventory expands through InventoryItem to one full item document per
/// slot. A character without an inventory gets an empty list; missing user
/// or guild references project as null, never as omitted keys.
pub fn character_doc(snap: &Snapshot, row: &character::Model) -> CharacterDoc {
    let inventory = match snap.inventory_of(row.id) {
        Some(inv) => snap
            .entries_of(inv.id)
            .into_iter()
            .filter_map(|entry| snap.item(entry.item_id).map(item_doc))
            .collect(),
        None => Vec::new(),
    };

    CharacterDoc {
        id: row.id,
        character_name: row.character_name.clone(),
        level: row.level,
        hp: row.hp,
        mana: row.mana,
        xp: row.xp,
        gold: row.gold,
        user: snap.user(row.user_id).map(|u| UserRef {
            id: u.id,
            username: u.username.clone(),
            email: u.email.clone(),
        }),
        guild: row.guild_id.and_then(|gid| snap.guild(gid)).map(|g| GuildRef {
            id: g.id,
            guild_name: g.guild_name.clone(),
        }),
        inventory,
        skills: snap.skills_of(row.id).into_iter().map(skill_doc).collect(),
        quests: snap
            .quests_of(row.id)
            .into_iter()
            .map(|q| quest_doc(snap, q))
            .collect(),
        battles: snap.battles_of(row.id).into_iter().map(battle_doc).collect(),
    }
}

/// Standalone inventory document: shallow id/quantity pairs
pub fn inventory_doc(snap: &Snapshot, row: &inventory::Model) -> InventoryDoc {
    InventoryDoc {
        id: row.id,
        character_id: row.character_id,
        items: snap
            .entries_of(row.id)
            .into_iter()
            .map(|entry| InventoryEntry {
                item_id: entry.item_id,
                quantity: entry.quantity.max(0),
            })
            .collect(),
    }
}

// ----------------------------------------------------------------------
// Full projection
// ----------------------------------------------------------------------

/// Project the whole snapshot into per-collection replacement batches
pub fn project_all(snap: &Snapshot) -> Result<Vec<CollectionBatch>> {
    Ok(vec![
        batch("items", snap.items.iter().map(item_doc))?,
        batch("skills", snap.skills.iter().map(skill_doc))?,
        batch("npcs", snap.npcs.iter().map(npc_doc))?,
        batch("quests", snap.quests.iter().map(|q| quest_doc(snap, q)))?,
        batch("battles", snap.battles.iter().map(battle_doc))?,
        batch("guilds", snap.guilds.iter().map(|g| guild_doc(snap, g)))?,
        batch("users", snap.users.iter().map(|u| user_doc(snap, u)))?,
        batch(
            "characters",
            snap.characters.iter().map(|c| character_doc(snap, c)),
        )?,
        batch(
            "inventories",
            snap.inventories.iter().map(|i| inventory_doc(snap, i)),
        )?,
        batch("transactions", snap.transactions.iter().map(transaction_doc))?,
    ])
}

fn batch<T, I>(name: &'static str, docs: I) -> Result<CollectionBatch>
where
    T: serde::Serialize,
    I: Iterator<Item = T>,
{
    let documents = docs
        .map(|d| {
            bson::to_document(&d)
                .map_err(|e| BridgeError::Projection(format!("{}: {}", name, e)))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CollectionBatch { name, documents })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures;
    use bson::Bson;

    #[test]
    fn guild_members_are_names_in_source_order() {
        let snap = fixtures::world();
        let doc = guild_doc(&snap, &snap.guilds[0]);
        assert_eq!(doc.guild_name, "Knights of Dawn");
        assert_eq!(doc.members, vec!["Aria".to_string(), "Bron".to_string()]);
    }

    #[test]
    fn character_without_guild_serializes_null_not_omitted() {
        let snap = fixtures::world();
        let cael = snap.character(3).unwrap();
        let doc = bson::to_document(&character_doc(&snap, cael)).unwrap();
        assert_eq!(doc.get("guild"), Some(&Bson::Null));
        assert_eq!(doc.get("inventory"), Some(&Bson::Array(vec![])));
    }

    #[test]
    fn inventory_expands_one_full_item_per_slot() {
        let snap = fixtures::world();
        let aria = snap.character(1).unwrap();
        let doc = character_doc(&snap, aria);
        // Three InventoryItem rows, two pointing at the same item
        assert_eq!(doc.inventory.len(), 3);
        assert_eq!(doc.inventory[0].name, "Iron Sword");
        assert_eq!(doc.inventory[1].name, "Healing Potion");
        assert_eq!(doc.inventory[2].name, "Iron Sword");
        // Full item records, not bare ids
        assert_eq!(doc.inventory[0].stats.as_deref(), Some("atk+5"));
    }

    #[test]
    fn quest_embeds_npc_and_nulls_completed_at() {
        let snap = fixtures::world();
        let q = quest_doc(&snap, snap.quest(9).unwrap());
        let npc = q.npc.as_ref().expect("npc embedded");
        assert_eq!(npc.name, "Old Sage");
        assert_eq!(npc.role.as_deref(), Some("Questgiver"));
        assert_eq!(npc.location.as_deref(), Some("Village"));
        assert_eq!(q.completed_at, None);

        let doc = bson::to_document(&q).unwrap();
        assert_eq!(doc.get("completed_at"), Some(&Bson::Null));
        assert!(matches!(doc.get("npc"), Some(Bson::Document(_))));
    }

    #[test]
    fn dangling_npc_projects_as_null() {
        let snap = fixtures::world();
        let q = quest_doc(&snap, snap.quest(10).unwrap());
        assert!(q.npc.is_none());
        let doc = bson::to_document(&q).unwrap();
        assert_eq!(doc.get("npc"), Some(&Bson::Null));
    }

    #[test]
    fn user_embeds_full_transactions_and_character_refs() {
        let snap = fixtures::world();
        let doc = user_doc(&snap, &snap.users[0]);
        assert_eq!(doc.transactions.len(), 1);
        assert_eq!(doc.transactions[0].item_id, 2);
        assert_eq!(doc.transactions[0].cost, 50);
        let names: Vec<&str> = doc.characters.iter().map(|c| c.character_name.as_str()).collect();
        assert_eq!(names, vec!["Aria", "Bron", "Cael"]);
        // Lightweight refs only carry id, name, level
        assert_eq!(doc.characters[0].level, 5);
    }

    #[test]
    fn standalone_inventory_uses_shallow_shape_and_clamps_quantity() {
        let snap = fixtures::world();
        let doc = inventory_doc(&snap, &snap.inventories[0]);
        assert_eq!(doc.character_id, 1);
        assert_eq!(doc.items.len(), 3);
        assert_eq!(doc.items[0].item_id, 1);
        assert_eq!(doc.items[0].quantity, 1);
        // The source held -2; the projection must not emit negatives
        assert_eq!(doc.items[2].quantity, 0);
    }

    #[test]
    fn collections_are_complete_and_ordered() {
        let snap = fixtures::world();
        let batches = project_all(&snap).unwrap();
        let names: Vec<&str> = batches.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            vec![
                "items",
                "skills",
                "npcs",
                "quests",
                "battles",
                "guilds",
                "users",
                "characters",
                "inventories",
                "transactions"
            ]
        );
        let characters = batches.iter().find(|b| b.name == "characters").unwrap();
        assert_eq!(characters.documents.len(), 3);
    }

    #[test]
    fn projection_is_idempotent() {
        let snap = fixtures::world();
        let first = project_all(&snap).unwrap();
        let second = project_all(&snap).unwrap();
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.documents, b.documents);
        }
    }

    #[test]
    fn timestamps_are_iso8601_text() {
        let snap = fixtures::world();
        let doc = user_doc(&snap, &snap.users[0]);
        assert_eq!(doc.date_joined, "2024-01-15T09:30:00Z");
        assert_eq!(doc.last_login, None);
    }
}

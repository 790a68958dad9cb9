//! Document shapes for the MongoDB projection
//!
//! One struct per collection entry plus the embedded sub-document forms.
//! Field sets are fixed per entity type and every optional relational field
//! serializes as BSON null rather than being omitted, so two runs over the
//! same source produce identical collections. Timestamps are canonicalized to
//! ISO-8601 text.

use serde::Serialize;

/// `items` collection entry; also embedded per inventory slot on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ItemDoc {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rarity: String,
    pub value: Option<i32>,
    pub stats: Option<String>,
}

/// `skills` collection entry; embedded in full on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SkillDoc {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub damage: Option<i32>,
    pub healing: Option<i32>,
}

/// `npcs` collection entry; embedded in full on quests
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NpcDoc {
    pub id: i32,
    pub name: String,
    pub role: Option<String>,
    pub location: Option<String>,
}

/// `quests` collection entry
///
/// The NPC is embedded as a sub-document so a quest read never needs a
/// second lookup; a dangling reference projects as null.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct QuestDoc {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub reward_money: Option<i32>,
    pub reward_xp: Option<i32>,
    pub status: String,
    pub completed_at: Option<String>,
    pub npc: Option<NpcDoc>,
}

/// `battles` collection entry; embedded in full on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct BattleDoc {
    pub id: i32,
    pub character_id: i32,
    pub xp: i32,
    pub money: i32,
    pub outcome: String,
}

/// `guilds` collection entry with denormalized member names
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GuildDoc {
    pub id: i32,
    pub guild_name: String,
    /// Member character names in source enumeration order
    pub members: Vec<String>,
}

/// `transactions` collection entry; embedded in full on users
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TransactionDoc {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub quantity: i32,
    pub cost: i32,
}

/// Lightweight character reference embedded on users
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharacterRef {
    pub id: i32,
    pub character_name: String,
    pub level: i32,
}

/// `users` collection entry
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UserDoc {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: String,
    pub last_login: Option<String>,
    pub transactions: Vec<TransactionDoc>,
    pub characters: Vec<CharacterRef>,
}

/// Guild summary embedded on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct GuildRef {
    pub id: i32,
    pub guild_name: String,
}

/// User summary embedded on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct UserRef {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// `characters` collection entry - the most deeply embedded document
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CharacterDoc {
    pub id: i32,
    pub character_name: String,
    pub level: i32,
    pub hp: i32,
    pub mana: i32,
    pub xp: i32,
    pub gold: i32,
    pub user: Option<UserRef>,
    pub guild: Option<GuildRef>,
    /// One full item document per inventory slot, expanded through
    /// Inventory -> InventoryItem -> Item; empty when no inventory exists
    pub inventory: Vec<ItemDoc>,
    pub skills: Vec<SkillDoc>,
    pub quests: Vec<QuestDoc>,
    pub battles: Vec<BattleDoc>,
}

/// Entry of the standalone `inventories` collection
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InventoryEntry {
    pub item_id: i32,
    pub quantity: i32,
}

/// `inventories` collection entry - the shallow shape, distinct from the
/// expanded form embedded on characters
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InventoryDoc {
    pub id: i32,
    pub character_id: i32,
    pub items: Vec<InventoryEntry>,
}

//! Shared snapshot fixtures for projection tests
//!
//! One small world exercising every relationship shape: a guild with two
//! members, a guildless character without an inventory, an inventory with a
//! duplicated item and a negative quantity, a quest with a resolvable NPC and
//! one with a dangling reference.

use chrono::{TimeZone, Utc};

use crate::source::entity::{
    battle, character, character_quest, character_skill, guild, inventory, inventory_item, item,
    npc, quest, skill, transaction, user,
};
use crate::source::Snapshot;

pub fn world() -> Snapshot {
    Snapshot {
        users: vec![user::Model {
            id: 1,
            username: "aria_player".to_string(),
            email: "aria@example.com".to_string(),
            is_staff: false,
            is_superuser: false,
            date_joined: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            last_login: None,
        }],
        guilds: vec![guild::Model {
            id: 7,
            guild_name: "Knights of Dawn".to_string(),
            members: 2,
        }],
        characters: vec![
            character::Model {
                id: 1,
                character_name: "Aria".to_string(),
                level: 5,
                hp: 120,
                mana: 60,
                xp: 40,
                gold: 200,
                user_id: 1,
                guild_id: Some(7),
            },
            character::Model {
                id: 2,
                character_name: "Bron".to_string(),
                level: 3,
                hp: 90,
                mana: 30,
                xp: 10,
                gold: 75,
                user_id: 1,
                guild_id: Some(7),
            },
            character::Model {
                id: 3,
                character_name: "Cael".to_string(),
                level: 1,
                hp: 100,
                mana: 50,
                xp: 0,
                gold: 0,
                user_id: 1,
                guild_id: None,
            },
        ],
        items: vec![
            item::Model {
                id: 1,
                name: "Iron Sword".to_string(),
                kind: Some("weapon".to_string()),
                rarity: "common".to_string(),
                value: Some(50),
                stats: Some("atk+5".to_string()),
            },
            item::Model {
                id: 2,
                name: "Healing Potion".to_string(),
                kind: None,
                rarity: "common".to_string(),
                value: None,
                stats: None,
            },
        ],
        skills: vec![
            skill::Model {
                id: 1,
                name: "Fireball".to_string(),
                description: Some("A burst of flame".to_string()),
                damage: Some(25),
                healing: None,
            },
            skill::Model {
                id: 2,
                name: "Mend".to_string(),
                description: None,
                damage: None,
                healing: Some(15),
            },
        ],
        npcs: vec![npc::Model {
            id: 4,
            name: "Old Sage".to_string(),
            role: Some("Questgiver".to_string()),
            location: Some("Village".to_string()),
        }],
        quests: vec![
            quest::Model {
                id: 9,
                title: "Retrieve the Amulet".to_string(),
                description: Some("Bring back the lost amulet".to_string()),
                reward_money: Some(100),
                reward_xp: Some(150),
                status: quest::STATUS_NOT_STARTED.to_string(),
                completed_at: None,
                npc_id: 4,
            },
            quest::Model {
                id: 10,
                title: "Forgotten Errand".to_string(),
                description: None,
                reward_money: None,
                reward_xp: None,
                status: quest::STATUS_IN_PROGRESS.to_string(),
                completed_at: None,
                // NPC row no longer exists in the source
                npc_id: 99,
            },
        ],
        inventories: vec![inventory::Model {
            id: 5,
            character_id: 1,
        }],
        inventory_items: vec![
            inventory_item::Model {
                id: 1,
                inventory_id: 5,
                item_id: 1,
                quantity: 1,
            },
            inventory_item::Model {
                id: 2,
                inventory_id: 5,
                item_id: 2,
                quantity: 3,
            },
            inventory_item::Model {
                id: 3,
                inventory_id: 5,
                item_id: 1,
                quantity: -2,
            },
        ],
        battles: vec![battle::Model {
            id: 1,
            character_id: 1,
            xp: 50,
            money: 10,
            outcome: battle::OUTCOME_VICTORY.to_string(),
        }],
        transactions: vec![transaction::Model {
            id: 1,
            user_id: 1,
            item_id: 2,
            quantity: 2,
            cost: 50,
        }],
        character_skills: vec![
            character_skill::Model {
                id: 1,
                character_id: 1,
                skill_id: 1,
            },
            character_skill::Model {
                id: 2,
                character_id: 1,
                skill_id: 2,
            },
            character_skill::Model {
                id: 3,
                character_id: 2,
                skill_id: 1,
            },
            // Skill row no longer exists in the source
            character_skill::Model {
                id: 4,
                character_id: 2,
                skill_id: 42,
            },
        ],
        character_quests: vec![character_quest::Model {
            id: 1,
            character_id: 1,
            quest_id: 9,
        }],
    }
}

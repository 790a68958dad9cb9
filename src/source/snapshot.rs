//! Immutable in-memory snapshot of the relational source
//!
//! Every table is materialized in full, rows ordered by primary key. That
//! order is the "source enumeration order" both projections inherit, which is
//! what makes repeated runs over an unchanged source reproducible. Traversal
//! helpers perform the joins in memory; the entity set is small enough that
//! linear scans are the simplest correct choice.

use crate::source::entity::{
    battle, character, character_quest, character_skill, guild, inventory, inventory_item, item,
    npc, quest, skill, transaction, user,
};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<user::Model>,
    pub guilds: Vec<guild::Model>,
    pub characters: Vec<character::Model>,
    pub items: Vec<item::Model>,
    pub skills: Vec<skill::Model>,
    pub npcs: Vec<npc::Model>,
    pub quests: Vec<quest::Model>,
    pub inventories: Vec<inventory::Model>,
    pub inventory_items: Vec<inventory_item::Model>,
    pub battles: Vec<battle::Model>,
    pub transactions: Vec<transaction::Model>,
    pub character_skills: Vec<character_skill::Model>,
    pub character_quests: Vec<character_quest::Model>,
}

impl Snapshot {
    // ------------------------------------------------------------------
    // Lookups by primary key
    // ------------------------------------------------------------------

    pub fn user(&self, id: i32) -> Option<&user::Model> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn guild(&self, id: i32) -> Option<&guild::Model> {
        self.guilds.iter().find(|g| g.id == id)
    }

    pub fn character(&self, id: i32) -> Option<&character::Model> {
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: i32) -> Option<&item::Model> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn skill(&self, id: i32) -> Option<&skill::Model> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn npc(&self, id: i32) -> Option<&npc::Model> {
        self.npcs.iter().find(|n| n.id == id)
    }

    pub fn quest(&self, id: i32) -> Option<&quest::Model> {
        self.quests.iter().find(|q| q.id == id)
    }

    // ------------------------------------------------------------------
    // Relationship traversal (reverse lookups and associations)
    // ------------------------------------------------------------------

    /// Characters owned by a user, in source order
    pub fn characters_of(&self, user_id: i32) -> Vec<&character::Model> {
        self.characters.iter().filter(|c| c.user_id == user_id).collect()
    }

    /// Member characters of a guild, in source order
    pub fn members_of(&self, guild_id: i32) -> Vec<&character::Model> {
        self.characters
            .iter()
            .filter(|c| c.guild_id == Some(guild_id))
            .collect()
    }

    /// Transactions of a user, in source order
    pub fn transactions_of(&self, user_id: i32) -> Vec<&transaction::Model> {
        self.transactions.iter().filter(|t| t.user_id == user_id).collect()
    }

    /// Battles fought by a character, in source order
    pub fn battles_of(&self, character_id: i32) -> Vec<&battle::Model> {
        self.battles
            .iter()
            .filter(|b| b.character_id == character_id)
            .collect()
    }

    /// Skills of a character via the association table; dangling rows skipped
    pub fn skills_of(&self, character_id: i32) -> Vec<&skill::Model> {
        self.character_skills
            .iter()
            .filter(|cs| cs.character_id == character_id)
            .filter_map(|cs| self.skill(cs.skill_id))
            .collect()
    }

    /// Quests of a character via the association table; dangling rows skipped
    pub fn quests_of(&self, character_id: i32) -> Vec<&quest::Model> {
        self.character_quests
            .iter()
            .filter(|cq| cq.character_id == character_id)
            .filter_map(|cq| self.quest(cq.quest_id))
            .collect()
    }

    /// The character's inventory, if one exists
    pub fn inventory_of(&self, character_id: i32) -> Option<&inventory::Model> {
        self.inventories.iter().find(|i| i.character_id == character_id)
    }

    /// Item entries of an inventory, in source order
    pub fn entries_of(&self, inventory_id: i32) -> Vec<&inventory_item::Model> {
        self.inventory_items
            .iter()
            .filter(|e| e.inventory_id == inventory_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::source::fixtures;

    #[test]
    fn members_follow_source_order() {
        let snap = fixtures::world();
        let names: Vec<&str> = snap.members_of(7).iter().map(|c| c.character_name.as_str()).collect();
        assert_eq!(names, vec!["Aria", "Bron"]);
    }

    #[test]
    fn skills_resolve_through_association_table() {
        let snap = fixtures::world();
        let names: Vec<&str> = snap.skills_of(1).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Fireball", "Mend"]);
    }

    #[test]
    fn missing_inventory_is_none() {
        let snap = fixtures::world();
        assert!(snap.inventory_of(3).is_none());
    }

    #[test]
    fn inventory_entries_include_duplicate_items() {
        let snap = fixtures::world();
        // Three entry rows, two of which point at the same item
        assert_eq!(snap.entries_of(5).len(), 3);
    }

    #[test]
    fn dangling_association_rows_are_skipped() {
        let snap = fixtures::world();
        // Bron has one valid skill row and one pointing at a deleted skill
        let names: Vec<&str> = snap.skills_of(2).iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Fireball"]);
    }
}

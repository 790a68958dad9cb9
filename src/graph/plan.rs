//! Graph projection plan
//!
//! Pure transformation from the relational snapshot into node and edge
//! specs. Each row becomes one node labeled by entity type, keyed by a
//! `sql_id` property holding the relational primary key (never the store's
//! native identifier). Each foreign key and association row becomes one
//! directed edge typed by the upper-cased field name. The mapping is
//! statically declared per entity; there is no reflective field walking.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::source::Snapshot;

/// Scalar property value on a graph node
///
/// Temporal values are canonicalized to ISO-8601 text and decimal values to
/// floating point before they reach the store.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl PropValue {
    pub fn int(v: i32) -> Self {
        PropValue::Int(v as i64)
    }

    pub fn opt_int(v: Option<i32>) -> Self {
        v.map(Self::int).unwrap_or(PropValue::Null)
    }

    pub fn text(v: &str) -> Self {
        PropValue::Text(v.to_string())
    }

    pub fn opt_text(v: &Option<String>) -> Self {
        v.as_deref().map(Self::text).unwrap_or(PropValue::Null)
    }

    pub fn datetime(v: &DateTime<Utc>) -> Self {
        PropValue::Text(v.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn opt_datetime(v: &Option<DateTime<Utc>>) -> Self {
        v.as_ref().map(Self::datetime).unwrap_or(PropValue::Null)
    }
}

/// One node per relational row
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub label: &'static str,
    pub sql_id: i64,
    pub props: Vec<(&'static str, PropValue)>,
}

/// One directed, typed edge per resolvable relationship
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub src_label: &'static str,
    pub src_id: i64,
    pub rel: &'static str,
    pub dst_label: &'static str,
    pub dst_id: i64,
}

/// Full plan for one run, nodes strictly before edges
#[derive(Debug, Clone, Default)]
pub struct GraphPlan {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    /// Relationships skipped because the referenced row no longer exists
    pub dangling: Vec<String>,
}

/// Node labels in creation order, one per entity type
pub const LABELS: [&str; 11] = [
    "User",
    "Guild",
    "Character",
    "Item",
    "Skill",
    "NPC",
    "Quest",
    "Inventory",
    "InventoryItem",
    "Battle",
    "Transaction",
];

fn node(label: &'static str, id: i32, mut props: Vec<(&'static str, PropValue)>) -> NodeSpec {
    // The pk is stored both under its column name and as the dedicated key
    props.insert(0, ("id", PropValue::int(id)));
    props.insert(1, ("sql_id", PropValue::int(id)));
    NodeSpec {
        label,
        sql_id: id as i64,
        props,
    }
}

/// Build the full node and edge plan for a snapshot
pub fn plan(snap: &Snapshot) -> GraphPlan {
    let mut plan = GraphPlan::default();

    // ------------------------------------------------------------------
    // Node pass: every row of every entity type
    // ------------------------------------------------------------------

    for u in &snap.users {
        plan.nodes.push(node(
            "User",
            u.id,
            vec![
                ("username", PropValue::text(&u.username)),
                ("email", PropValue::text(&u.email)),
                ("is_staff", PropValue::Bool(u.is_staff)),
                ("is_superuser", PropValue::Bool(u.is_superuser)),
                ("date_joined", PropValue::datetime(&u.date_joined)),
                ("last_login", PropValue::opt_datetime(&u.last_login)),
            ],
        ));
    }

    for g in &snap.guilds {
        plan.nodes.push(node(
            "Guild",
            g.id,
            vec![
                ("guild_name", PropValue::text(&g.guild_name)),
                ("members", PropValue::int(g.members)),
            ],
        ));
    }

    for c in &snap.characters {
        plan.nodes.push(node(
            "Character",
            c.id,
            vec![
                ("character_name", PropValue::text(&c.character_name)),
                ("level", PropValue::int(c.level)),
                ("hp", PropValue::int(c.hp)),
                ("mana", PropValue::int(c.mana)),
                ("xp", PropValue::int(c.xp)),
                ("gold", PropValue::int(c.gold)),
                ("user_id", PropValue::int(c.user_id)),
                ("guild_id", PropValue::opt_int(c.guild_id)),
            ],
        ));
    }

    for i in &snap.items {
        plan.nodes.push(node(
            "Item",
            i.id,
            vec![
                ("name", PropValue::text(&i.name)),
                ("type", PropValue::opt_text(&i.kind)),
                ("rarity", PropValue::text(&i.rarity)),
                ("value", PropValue::opt_int(i.value)),
                ("stats", PropValue::opt_text(&i.stats)),
            ],
        ));
    }

    for s in &snap.skills {
        plan.nodes.push(node(
            "Skill",
            s.id,
            vec![
                ("name", PropValue::text(&s.name)),
                ("description", PropValue::opt_text(&s.description)),
                ("damage", PropValue::opt_int(s.damage)),
                ("healing", PropValue::opt_int(s.healing)),
            ],
        ));
    }

    for n in &snap.npcs {
        plan.nodes.push(node(
            "NPC",
            n.id,
            vec![
                ("name", PropValue::text(&n.name)),
                ("role", PropValue::opt_text(&n.role)),
                ("location", PropValue::opt_text(&n.location)),
            ],
        ));
    }

    for q in &snap.quests {
        plan.nodes.push(node(
            "Quest",
            q.id,
            vec![
                ("title", PropValue::text(&q.title)),
                ("description", PropValue::opt_text(&q.description)),
                ("reward_money", PropValue::opt_int(q.reward_money)),
                ("reward_xp", PropValue::opt_int(q.reward_xp)),
                ("status", PropValue::text(&q.status)),
                ("completed_at", PropValue::opt_datetime(&q.completed_at)),
                ("npc_id", PropValue::int(q.npc_id)),
            ],
        ));
    }

    for inv in &snap.inventories {
        plan.nodes.push(node(
            "Inventory",
            inv.id,
            vec![("character_id", PropValue::int(inv.character_id))],
        ));
    }

    for entry in &snap.inventory_items {
        plan.nodes.push(node(
            "InventoryItem",
            entry.id,
            vec![
                ("inventory_id", PropValue::int(entry.inventory_id)),
                ("item_id", PropValue::int(entry.item_id)),
                ("quantity", PropValue::int(entry.quantity.max(0))),
            ],
        ));
    }

    for b in &snap.battles {
        plan.nodes.push(node(
            "Battle",
            b.id,
            vec![
                ("character_id", PropValue::int(b.character_id)),
                ("xp", PropValue::int(b.xp)),
                ("money", PropValue::int(b.money)),
                ("outcome", PropValue::text(&b.outcome)),
            ],
        ));
    }

    for t in &snap.transactions {
        plan.nodes.push(node(
            "Transaction",
            t.id,
            vec![
                ("user_id", PropValue::int(t.user_id)),
                ("item_id", PropValue::int(t.item_id)),
                ("quantity", PropValue::int(t.quantity)),
                ("cost", PropValue::int(t.cost)),
            ],
        ));
    }

    // ------------------------------------------------------------------
    // Edge pass: one directed edge per resolvable FK / association row
    // ------------------------------------------------------------------

    for c in &snap.characters {
        plan.edge("Character", c.id, "USER", "User", c.user_id, snap.user(c.user_id).is_some());
        if let Some(gid) = c.guild_id {
            plan.edge("Character", c.id, "GUILD", "Guild", gid, snap.guild(gid).is_some());
        }
    }

    for cs in &snap.character_skills {
        plan.edge(
            "Character",
            cs.character_id,
            "SKILLS",
            "Skill",
            cs.skill_id,
            snap.character(cs.character_id).is_some() && snap.skill(cs.skill_id).is_some(),
        );
    }

    for cq in &snap.character_quests {
        plan.edge(
            "Character",
            cq.character_id,
            "QUESTS",
            "Quest",
            cq.quest_id,
            snap.character(cq.character_id).is_some() && snap.quest(cq.quest_id).is_some(),
        );
    }

    for q in &snap.quests {
        plan.edge("Quest", q.id, "NPC", "NPC", q.npc_id, snap.npc(q.npc_id).is_some());
    }

    for inv in &snap.inventories {
        plan.edge(
            "Inventory",
            inv.id,
            "CHARACTER",
            "Character",
            inv.character_id,
            snap.character(inv.character_id).is_some(),
        );
    }

    for entry in &snap.inventory_items {
        plan.edge(
            "InventoryItem",
            entry.id,
            "INVENTORY",
            "Inventory",
            entry.inventory_id,
            snap.inventories.iter().any(|i| i.id == entry.inventory_id),
        );
        plan.edge(
            "InventoryItem",
            entry.id,
            "ITEM",
            "Item",
            entry.item_id,
            snap.item(entry.item_id).is_some(),
        );
    }

    for b in &snap.battles {
        plan.edge(
            "Battle",
            b.id,
            "CHARACTER",
            "Character",
            b.character_id,
            snap.character(b.character_id).is_some(),
        );
    }

    for t in &snap.transactions {
        plan.edge("Transaction", t.id, "USER", "User", t.user_id, snap.user(t.user_id).is_some());
        plan.edge("Transaction", t.id, "ITEM", "Item", t.item_id, snap.item(t.item_id).is_some());
    }

    plan
}

impl GraphPlan {
    fn edge(
        &mut self,
        src_label: &'static str,
        src_id: i32,
        rel: &'static str,
        dst_label: &'static str,
        dst_id: i32,
        resolvable: bool,
    ) {
        if resolvable {
            self.edges.push(EdgeSpec {
                src_label,
                src_id: src_id as i64,
                rel,
                dst_label,
                dst_id: dst_id as i64,
            });
        } else {
            self.dangling.push(format!(
                "{}({}) -[{}]-> {}({}) skipped: target row missing",
                src_label, src_id, rel, dst_label, dst_id
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures;
    use std::collections::BTreeSet;

    #[test]
    fn one_node_per_row_keyed_by_sql_id() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        let expected = snap.users.len()
            + snap.guilds.len()
            + snap.characters.len()
            + snap.items.len()
            + snap.skills.len()
            + snap.npcs.len()
            + snap.quests.len()
            + snap.inventories.len()
            + snap.inventory_items.len()
            + snap.battles.len()
            + snap.transactions.len();
        assert_eq!(plan.nodes.len(), expected);

        for n in &plan.nodes {
            let sql_id = n.props.iter().find(|(k, _)| *k == "sql_id").map(|(_, v)| v);
            assert_eq!(sql_id, Some(&PropValue::Int(n.sql_id)));
        }
    }

    #[test]
    fn one_skills_edge_per_association_pair() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        let skills_edges: Vec<_> = plan.edges.iter().filter(|e| e.rel == "SKILLS").collect();
        // Fixture holds three resolvable pairs plus one dangling row
        assert_eq!(skills_edges.len(), 3);
        for e in &skills_edges {
            assert_eq!(e.src_label, "Character");
            assert_eq!(e.dst_label, "Skill");
        }
        let pairs: BTreeSet<(i64, i64)> =
            skills_edges.iter().map(|e| (e.src_id, e.dst_id)).collect();
        assert_eq!(pairs.len(), skills_edges.len(), "no duplicate pairs");
    }

    #[test]
    fn guild_membership_becomes_guild_edges() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        let guild_edges: Vec<_> = plan.edges.iter().filter(|e| e.rel == "GUILD").collect();
        assert_eq!(guild_edges.len(), 2);
        assert!(guild_edges.iter().all(|e| e.dst_id == 7));
        // Cael has no guild and must not produce an edge
        assert!(!guild_edges.iter().any(|e| e.src_id == 3));
    }

    #[test]
    fn dangling_references_are_skipped_not_fatal() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        // Quest 10 points at NPC 99 which no longer exists
        assert!(!plan.edges.iter().any(|e| e.rel == "NPC" && e.src_id == 10));
        assert!(plan.dangling.iter().any(|d| d.contains("Quest(10)")));
        // The dangling character_skill row is skipped too
        assert!(plan.dangling.iter().any(|d| d.contains("SKILLS")));
    }

    #[test]
    fn temporal_props_are_iso8601_text() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        let user = plan.nodes.iter().find(|n| n.label == "User").unwrap();
        let joined = user.props.iter().find(|(k, _)| *k == "date_joined").unwrap();
        assert_eq!(joined.1, PropValue::Text("2024-01-15T09:30:00Z".to_string()));
        let last = user.props.iter().find(|(k, _)| *k == "last_login").unwrap();
        assert_eq!(last.1, PropValue::Null);
    }

    #[test]
    fn negative_quantity_clamps_to_zero() {
        let snap = fixtures::world();
        let plan = plan(&snap);

        let entry = plan
            .nodes
            .iter()
            .find(|n| n.label == "InventoryItem" && n.sql_id == 3)
            .unwrap();
        let qty = entry.props.iter().find(|(k, _)| *k == "quantity").unwrap();
        assert_eq!(qty.1, PropValue::Int(0));
    }

    #[test]
    fn plan_is_idempotent() {
        let snap = fixtures::world();
        let first = plan(&snap);
        let second = plan(&snap);

        let nodes_a: BTreeSet<(&str, i64)> =
            first.nodes.iter().map(|n| (n.label, n.sql_id)).collect();
        let nodes_b: BTreeSet<(&str, i64)> =
            second.nodes.iter().map(|n| (n.label, n.sql_id)).collect();
        assert_eq!(nodes_a, nodes_b);

        let edges_a: Vec<(i64, &str, i64)> =
            first.edges.iter().map(|e| (e.src_id, e.rel, e.dst_id)).collect();
        let edges_b: Vec<(i64, &str, i64)> =
            second.edges.iter().map(|e| (e.src_id, e.rel, e.dst_id)).collect();
        assert_eq!(edges_a, edges_b);
    }
}

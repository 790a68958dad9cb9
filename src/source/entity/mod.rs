//! Sea-ORM entity models for the RPG relational schema
//!
//! One statically declared model per table. Only the columns the projections
//! consume are modeled; the schema itself is owned by the upstream backend.
//! Association tables for the two many-to-many relations are modeled
//! explicitly so the snapshot can traverse them without lazy loading.

pub mod battle;
pub mod character;
pub mod character_quest;
pub mod character_skill;
pub mod guild;
pub mod inventory;
pub mod inventory_item;
pub mod item;
pub mod npc;
pub mod quest;
pub mod skill;
pub mod transaction;
pub mod user;

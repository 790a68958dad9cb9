//! Quest entity (`rpg_quest`)

use sea_orm::entity::prelude::*;

/// Quest status values as stored by the source backend
pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rpg_quest")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub reward_money: Option<i32>,
    pub reward_xp: Option<i32>,
    pub status: String,
    pub completed_at: Option<DateTimeUtc>,
    pub npc_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

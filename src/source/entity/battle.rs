//! Battle entity (`rpg_battle`)

use sea_orm::entity::prelude::*;

/// Battle outcome values as stored by the source backend
pub const OUTCOME_VICTORY: &str = "Victory";
pub const OUTCOME_DEFEAT: &str = "Defeat";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rpg_battle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_id: i32,
    pub xp: i32,
    pub money: i32,
    pub outcome: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

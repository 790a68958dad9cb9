//! Character entity (`rpg_character`)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rpg_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub character_name: String,
    pub level: i32,
    pub hp: i32,
    pub mana: i32,
    pub xp: i32,
    pub gold: i32,
    pub user_id: i32,
    pub guild_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

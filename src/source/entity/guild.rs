//! Guild entity (`rpg_guild`)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rpg_guild")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_name: String,
    /// Member count maintained by the source backend
    pub members: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! InventoryItem entity (`rpg_inventoryitem`)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rpg_inventoryitem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub inventory_id: i32,
    pub item_id: i32,
    /// Not constrained by the source schema; projections clamp it to >= 0
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! `SeaORM` entity for the `passwords` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "passwords")]
/// Database row model for one credential record.
pub struct Model {
    /// Insertion order
    #[sea_orm(primary_key)]
    pub seq: i32,
    /// Client-generated id, not unique
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

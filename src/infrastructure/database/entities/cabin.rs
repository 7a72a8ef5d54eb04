//! Cabin entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cabins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Maximum number of guests
    pub capacity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cabin_reservation::Entity")]
    CabinReservation,
}

impl Related<super::cabin_reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CabinReservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Cabin reservation entity
//!
//! One row per cabin of a reservation, carrying that cabin's stay.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cabin_reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub id_cabin: i32,

    pub id_reservation: i32,

    /// Check-in instant (inclusive)
    pub date_in: DateTimeUtc,

    /// Check-out instant (exclusive)
    pub date_out: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cabin::Entity",
        from = "Column::IdCabin",
        to = "super::cabin::Column::Id"
    )]
    Cabin,
    #[sea_orm(
        belongs_to = "super::reservation::Entity",
        from = "Column::IdReservation",
        to = "super::reservation::Column::Id"
    )]
    Reservation,
}

impl Related<super::cabin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cabin.def()
    }
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

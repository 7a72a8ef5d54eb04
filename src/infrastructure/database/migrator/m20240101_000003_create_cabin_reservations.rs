//! Create cabin_reservations table
//!
//! Links a reservation to each booked cabin with that cabin's stay dates.
//! Indexed for the overlap lookups done by availability and listings.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_cabins::Cabins;
use super::m20240101_000002_create_reservations::Reservations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CabinReservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CabinReservations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CabinReservations::IdCabin)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CabinReservations::IdReservation)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CabinReservations::DateIn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CabinReservations::DateOut)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cabin_reservations_cabin")
                            .from(CabinReservations::Table, CabinReservations::IdCabin)
                            .to(Cabins::Table, Cabins::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cabin_reservations_reservation")
                            .from(CabinReservations::Table, CabinReservations::IdReservation)
                            .to(Reservations::Table, Reservations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cabin_reservations_cabin_dates")
                    .table(CabinReservations::Table)
                    .col(CabinReservations::IdCabin)
                    .col(CabinReservations::DateIn)
                    .col(CabinReservations::DateOut)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cabin_reservations_reservation_cabin")
                    .table(CabinReservations::Table)
                    .col(CabinReservations::IdReservation)
                    .col(CabinReservations::IdCabin)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CabinReservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CabinReservations {
    Table,
    Id,
    IdCabin,
    IdReservation,
    DateIn,
    DateOut,
}

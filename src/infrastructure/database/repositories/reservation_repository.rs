//! SeaORM implementation of ReservationRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::domain::reservation::{
    CabinReservation, NewReservation, Reservation, ReservationRepository,
};
use crate::domain::{DomainError, DomainResult, StayInterval};
use crate::infrastructure::database::entities::{cabin_reservation, reservation};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn stay_to_domain(m: cabin_reservation::Model) -> CabinReservation {
    CabinReservation {
        id: m.id,
        cabin_id: m.id_cabin,
        reservation_id: m.id_reservation,
        stay: StayInterval::new(m.date_in, m.date_out),
    }
}

fn model_to_domain(m: reservation::Model, mut stays: Vec<cabin_reservation::Model>) -> Reservation {
    stays.sort_by_key(|s| s.id);
    Reservation {
        id: m.id,
        client_name: m.client_name,
        visitor_quantity: m.visitor_quantity,
        price: m.price,
        created_at: m.created_at,
        cabin_reservations: stays.into_iter().map(stay_to_domain).collect(),
    }
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create(&self, r: NewReservation, reject_overlaps: bool) -> DomainResult<i32> {
        debug!(
            "Creating reservation for {} ({} cabins)",
            r.client_name,
            r.cabin_ids.len()
        );

        // Dropping `txn` on an early return rolls it back.
        let txn = self.db.begin().await?;

        if reject_overlaps {
            let clash = cabin_reservation::Entity::find()
                .filter(cabin_reservation::Column::IdCabin.is_in(r.cabin_ids.iter().copied()))
                .filter(cabin_reservation::Column::DateIn.lt(r.stay.end))
                .filter(cabin_reservation::Column::DateOut.gt(r.stay.start))
                .order_by_asc(cabin_reservation::Column::Id)
                .one(&txn)
                .await?;

            if let Some(existing) = clash {
                return Err(DomainError::Conflict(format!(
                    "cabin {} is already booked from {} to {} (reservation {})",
                    existing.id_cabin,
                    existing.date_in.to_rfc3339(),
                    existing.date_out.to_rfc3339(),
                    existing.id_reservation
                )));
            }
        }

        let created = reservation::ActiveModel {
            id: NotSet,
            client_name: Set(r.client_name),
            visitor_quantity: Set(r.visitor_quantity),
            price: Set(r.price),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let stays = r.cabin_ids.iter().map(|cabin_id| cabin_reservation::ActiveModel {
            id: NotSet,
            id_cabin: Set(*cabin_id),
            id_reservation: Set(created.id),
            date_in: Set(r.stay.start),
            date_out: Set(r.stay.end),
        });
        cabin_reservation::Entity::insert_many(stays).exec(&txn).await?;

        txn.commit().await?;
        debug!("Reservation {} committed", created.id);
        Ok(created.id)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let found = reservation::Entity::find_by_id(id)
            .find_with_related(cabin_reservation::Entity)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .next()
            .map(|(m, stays)| model_to_domain(m, stays)))
    }

    async fn find_touching(&self, window: &StayInterval) -> DomainResult<Vec<Reservation>> {
        let hits = cabin_reservation::Entity::find()
            .filter(cabin_reservation::Column::DateIn.lte(window.end))
            .filter(cabin_reservation::Column::DateOut.gte(window.start))
            .all(&self.db)
            .await?;

        let ids: BTreeSet<i32> = hits.into_iter().map(|s| s.id_reservation).collect();
        debug!("{} reservations touch {:?}", ids.len(), window);
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let found = reservation::Entity::find()
            .filter(reservation::Column::Id.is_in(ids))
            .order_by_asc(reservation::Column::Id)
            .find_with_related(cabin_reservation::Entity)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .map(|(m, stays)| model_to_domain(m, stays))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CabinRepository;
    use crate::infrastructure::database::repositories::SeaOrmCabinRepository;
    use crate::infrastructure::database::testing::memory_db;
    use chrono::{DateTime, TimeZone};
    use rust_decimal::Decimal;

    fn at(m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, 0, 0, 0).unwrap()
    }

    fn booking(cabins: Vec<i32>, from: DateTime<Utc>, to: DateTime<Utc>) -> NewReservation {
        NewReservation {
            client_name: "Linus".into(),
            visitor_quantity: 3,
            price: Decimal::new(18000, 2),
            cabin_ids: cabins,
            stay: StayInterval::new(from, to),
        }
    }

    async fn setup() -> SeaOrmReservationRepository {
        let db = memory_db().await;
        let cabins = SeaOrmCabinRepository::new(db.clone());
        for (name, capacity) in [("Birch", 2), ("Cedar", 4), ("Maple", 5)] {
            cabins.insert(name, capacity).await.unwrap();
        }
        SeaOrmReservationRepository::new(db)
    }

    #[tokio::test]
    async fn create_writes_one_stay_per_cabin() {
        let repo = setup().await;
        let id = repo
            .create(booking(vec![1, 2], at(6, 1), at(6, 5)), true)
            .await
            .unwrap();

        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.cabin_ids(), vec![1, 2]);
        assert!(stored
            .cabin_reservations
            .iter()
            .all(|cr| cr.reservation_id == id
                && cr.stay == StayInterval::new(at(6, 1), at(6, 5))));
        assert_eq!(stored.price, Decimal::new(18000, 2));
    }

    #[tokio::test]
    async fn conflicting_create_rolls_back() {
        let repo = setup().await;
        repo.create(booking(vec![2], at(6, 1), at(6, 5)), true)
            .await
            .unwrap();

        let err = repo
            .create(booking(vec![1, 2], at(6, 3), at(6, 9)), true)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(ref m) if m.contains("cabin 2")));

        let june = repo
            .find_touching(&StayInterval::new(at(6, 1), at(7, 1)))
            .await
            .unwrap();
        assert_eq!(june.len(), 1);

        // back-to-back is not a conflict
        repo.create(booking(vec![1, 2], at(6, 5), at(6, 9)), true)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn find_touching_includes_shared_endpoints() {
        let repo = setup().await;
        let before = repo
            .create(booking(vec![1], at(2, 25), at(3, 1)), true)
            .await
            .unwrap();
        let inside = repo
            .create(booking(vec![1], at(3, 10), at(3, 12)), true)
            .await
            .unwrap();
        repo.create(booking(vec![1], at(5, 1), at(5, 3)), true)
            .await
            .unwrap();

        let march = repo
            .find_touching(&StayInterval::new(at(3, 1), at(4, 1)))
            .await
            .unwrap();
        assert_eq!(march.iter().map(|r| r.id).collect::<Vec<_>>(), vec![before, inside]);
    }

    #[tokio::test]
    async fn missing_reservation_is_none() {
        let repo = setup().await;
        assert!(repo.find_by_id(77).await.unwrap().is_none());
    }
}

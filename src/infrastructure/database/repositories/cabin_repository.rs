//! SeaORM implementation of CabinRepository

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::cabin::{Cabin, CabinRepository};
use crate::domain::{DomainResult, StayInterval};
use crate::infrastructure::database::entities::{cabin, cabin_reservation};

pub struct SeaOrmCabinRepository {
    db: DatabaseConnection,
}

impl SeaOrmCabinRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: cabin::Model) -> Cabin {
    Cabin {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
    }
}

#[async_trait]
impl CabinRepository for SeaOrmCabinRepository {
    async fn find_all(&self) -> DomainResult<Vec<Cabin>> {
        let models = cabin::Entity::find()
            .order_by_asc(cabin::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn find_by_ids(&self, ids: &[i32]) -> DomainResult<Vec<Cabin>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = cabin::Entity::find()
            .filter(cabin::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(cabin::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn booked_intervals(
        &self,
        range: &StayInterval,
    ) -> DomainResult<HashMap<i32, Vec<StayInterval>>> {
        let rows = cabin_reservation::Entity::find()
            .filter(cabin_reservation::Column::DateIn.lt(range.end))
            .filter(cabin_reservation::Column::DateOut.gt(range.start))
            .all(&self.db)
            .await?;
        debug!("{} booked stays overlap {:?}", rows.len(), range);

        let mut booked: HashMap<i32, Vec<StayInterval>> = HashMap::new();
        for row in rows {
            booked
                .entry(row.id_cabin)
                .or_default()
                .push(StayInterval::new(row.date_in, row.date_out));
        }
        Ok(booked)
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(cabin::Entity::find().count(&self.db).await?)
    }

    async fn insert(&self, name: &str, capacity: i32) -> DomainResult<Cabin> {
        debug!("Adding cabin {} (capacity {})", name, capacity);
        let model = cabin::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            capacity: Set(capacity),
        }
        .insert(&self.db)
        .await?;
        Ok(model_to_domain(model))
    }

    async fn seed_if_empty(&self, cabins: &[(String, i32)]) -> DomainResult<Vec<Cabin>> {
        // Dropping `txn` on an early return rolls it back.
        let txn = self.db.begin().await?;
        if cabins.is_empty() || cabin::Entity::find().count(&txn).await? > 0 {
            return Ok(Vec::new());
        }

        let mut seeded = Vec::with_capacity(cabins.len());
        for (name, capacity) in cabins {
            let model = cabin::ActiveModel {
                id: NotSet,
                name: Set(name.clone()),
                capacity: Set(*capacity),
            }
            .insert(&txn)
            .await?;
            seeded.push(model_to_domain(model));
        }

        txn.commit().await?;
        debug!("Seeded {} cabins", seeded.len());
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::testing::memory_db;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_ids_in_catalog_order() {
        let repo = SeaOrmCabinRepository::new(memory_db().await);
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.insert("Birch", 2).await.unwrap();
        repo.insert("Cedar", 4).await.unwrap();
        let maple = repo.insert("Maple", 5).await.unwrap();
        assert_eq!(maple, Cabin::new(3, "Maple", 5));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn failed_seed_leaves_catalog_empty() {
        let repo = SeaOrmCabinRepository::new(memory_db().await);
        let clashing = vec![("Birch".to_string(), 2), ("Birch".to_string(), 4)];
        assert!(repo.seed_if_empty(&clashing).await.is_err());
        assert_eq!(repo.count().await.unwrap(), 0);

        let seeds = vec![("Birch".to_string(), 2), ("Cedar".to_string(), 4)];
        let seeded = repo.seed_if_empty(&seeds).await.unwrap();
        assert_eq!(seeded, vec![Cabin::new(1, "Birch", 2), Cabin::new(2, "Cedar", 4)]);
        assert!(repo.seed_if_empty(&seeds).await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn find_by_ids_skips_unknown() {
        let repo = SeaOrmCabinRepository::new(memory_db().await);
        repo.insert("Birch", 2).await.unwrap();
        repo.insert("Cedar", 4).await.unwrap();

        let found = repo.find_by_ids(&[2, 9]).await.unwrap();
        assert_eq!(found, vec![Cabin::new(2, "Cedar", 4)]);
        assert!(repo.find_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn booked_intervals_excludes_touching_stays() {
        let db = memory_db().await;
        let repo = SeaOrmCabinRepository::new(db.clone());
        repo.insert("Birch", 2).await.unwrap();
        repo.insert("Cedar", 4).await.unwrap();

        let reservation = crate::infrastructure::database::entities::reservation::ActiveModel {
            id: NotSet,
            client_name: Set("Ada".into()),
            visitor_quantity: Set(2),
            price: Set(rust_decimal::Decimal::new(100, 0)),
            created_at: Set(at(1)),
        }
        .insert(&db)
        .await
        .unwrap();

        for (cabin_id, from, to) in [(1, 1, 5), (2, 5, 8)] {
            cabin_reservation::ActiveModel {
                id: NotSet,
                id_cabin: Set(cabin_id),
                id_reservation: Set(reservation.id),
                date_in: Set(at(from)),
                date_out: Set(at(to)),
            }
            .insert(&db)
            .await
            .unwrap();
        }

        let booked = repo
            .booked_intervals(&StayInterval::new(at(3), at(5)))
            .await
            .unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[&1], vec![StayInterval::new(at(1), at(5))]);
    }
}

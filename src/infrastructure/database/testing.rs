//! In-memory database fixtures for unit tests

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::SeaOrmRepositoryProvider;
use super::{init_database, run_migrations, DatabaseConfig};
use crate::domain::RepositoryProvider;

/// Fresh migrated in-memory database.
pub async fn memory_db() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();
    db
}

/// Repositories over a fresh database holding `cabins` in order
/// (ids are assigned 1, 2, 3, ...).
pub async fn memory_repos(cabins: &[(&str, i32)]) -> Arc<dyn RepositoryProvider> {
    let repos = SeaOrmRepositoryProvider::new(memory_db().await);
    for (name, capacity) in cabins {
        repos.cabins().insert(name, *capacity).await.unwrap();
    }
    Arc::new(repos)
}

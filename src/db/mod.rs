mod memory;
mod schema;
mod sqlite;
mod traits;

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ActivityRepo, ListRepo, MediaRepo, StatsRepo, Store, UserRepo};

use crate::config::{Backend, Config};
use crate::error::{StoreError, StoreResult};

/// Opens the backend selected by the configuration.
pub async fn open_store(config: &Config) -> StoreResult<Arc<dyn Store>> {
    let store: Arc<dyn Store> = match config.backend {
        Backend::Sqlite => Arc::new(SqliteStore::open(&config.db_path).await?),
        Backend::Memory => {
            tracing::info!("Using in-memory store, data will not persist");
            Arc::new(MemoryStore::new())
        }
    };
    store.health_check().await?;
    Ok(store)
}

/// Current time truncated to what the SQLite backend stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn require_user(user_id: &str) -> StoreResult<()> {
    if user_id.trim().is_empty() {
        return Err(StoreError::Validation("user id is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_store_sqlite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("cinelog.db");
        let config = Config {
            backend: Backend::Sqlite,
            db_path: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_open_store_memory() {
        let config = Config {
            backend: Backend::Memory,
            ..Config::default()
        };
        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_require_user() {
        assert!(require_user("firebase-uid").is_ok());
        assert!(matches!(require_user("  "), Err(StoreError::Validation(_))));
    }
}

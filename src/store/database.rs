//! PostgreSQL-backed store.
//!
//! The ledgers are synchronous, so the store owns a Tokio runtime and blocks on
//! each SeaORM call.

use sea_orm::DatabaseConnection;
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::Store;
use crate::config::DatabaseConfig;
use crate::db;
use crate::error::Result;

pub struct DatabaseStore {
    rt: Runtime,
    conn: DatabaseConnection,
}

impl DatabaseStore {
    /// Connect, create the table if needed and log what is there.
    pub fn connect(config: &DatabaseConfig) -> Result<Self> {
        let rt = Runtime::new()?;

        let conn = rt.block_on(async {
            let conn = db::connect(&config.connection_string(), config.max_connections).await?;
            db::ensure_schema(&conn).await?;

            if let Ok(version) = db::get_version(&conn).await {
                info!("PostgreSQL: {}", version);
            }
            if let Ok(count) = db::count_entries(&conn).await {
                info!("Store holds {} keys", count);
            }

            Ok::<_, sea_orm::DbErr>(conn)
        })?;

        Ok(Self { rt, conn })
    }
}

impl Store for DatabaseStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.rt.block_on(db::kv::get(&self.conn, key))?)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Ok(self.rt.block_on(db::kv::upsert(&self.conn, key, value))?)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.rt.block_on(db::kv::delete(&self.conn, key))?;
        Ok(())
    }
}

impl Drop for DatabaseStore {
    fn drop(&mut self) {
        // Close the pool while the runtime is still alive.
        if let Err(e) = self.rt.block_on(self.conn.clone().close()) {
            warn!("Failed to close database pool: {e}");
        }
    }
}

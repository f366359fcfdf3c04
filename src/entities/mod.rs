//! SeaORM entities for the database-backed store.

pub mod kv_entries;

pub mod prelude {
    pub use super::kv_entries::Entity as KvEntries;
}

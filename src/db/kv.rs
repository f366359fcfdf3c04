//! Key-value repository over the `kv_entries` table.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::entities::{kv_entries, prelude::*};

/// Get the value stored under a key.
pub async fn get(db: &DatabaseConnection, key: &str) -> Result<Option<String>, DbErr> {
    let row = KvEntries::find_by_id(key.to_owned()).one(db).await?;
    Ok(row.map(|r| r.value))
}

/// Insert or replace the value stored under a key.
pub async fn upsert(db: &DatabaseConnection, key: &str, value: &str) -> Result<(), DbErr> {
    let model = kv_entries::ActiveModel {
        key: Set(key.to_owned()),
        value: Set(value.to_owned()),
        updated_at: Set(Utc::now().into()),
    };

    KvEntries::insert(model)
        .on_conflict(
            OnConflict::column(kv_entries::Column::Key)
                .update_columns([kv_entries::Column::Value, kv_entries::Column::UpdatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Ok(())
}

/// Delete a key. Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, key: &str) -> Result<bool, DbErr> {
    let result = KvEntries::delete_by_id(key.to_owned()).exec(db).await?;
    Ok(result.rows_affected > 0)
}

use anyhow::Result;
use sqlx::{Row, SqlitePool};

use crate::config::Config;
use crate::db;

/// Create the schema in the configured database. Idempotent.
pub async fn run_migrations(config: &Config) -> Result<()> {
    let pool = db::connect(config).await?;
    migrate_pool(&pool).await?;
    pool.close().await;
    Ok(())
}

pub async fn migrate_pool(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            indexed_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One row per document slot; policy is IndexPolicy::as_str.
    // value_folded is value.to_lowercase(): SQLite's lower() folds ASCII only.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS document_fields (
            document_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            value_folded TEXT NOT NULL DEFAULT '',
            policy TEXT NOT NULL,
            PRIMARY KEY (document_id, key),
            FOREIGN KEY (document_id) REFERENCES documents(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_document_fields_key ON document_fields(key)")
        .execute(pool)
        .await?;

    add_value_folded(pool).await?;

    Ok(())
}

/// Upgrade databases created before `value_folded` existed.
async fn add_value_folded(pool: &SqlitePool) -> Result<()> {
    let columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('document_fields')")
            .fetch_all(pool)
            .await?;
    if columns.iter().any(|c| c == "value_folded") {
        return Ok(());
    }

    sqlx::query("ALTER TABLE document_fields ADD COLUMN value_folded TEXT NOT NULL DEFAULT ''")
        .execute(pool)
        .await?;

    let rows = sqlx::query("SELECT document_id, key, value FROM document_fields")
        .fetch_all(pool)
        .await?;
    let mut tx = pool.begin().await?;
    for row in &rows {
        let value: String = row.get("value");
        sqlx::query(
            "UPDATE document_fields SET value_folded = ? WHERE document_id = ? AND key = ?",
        )
        .bind(value.to_lowercase())
        .bind(row.get::<String, _>("document_id"))
        .bind(row.get::<String, _>("key"))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    tracing::info!(rows = rows.len(), "added value_folded to document_fields");
    Ok(())
}

//! SQLite-backed [`Store`] implementation.
//!
//! Each document is a row in `documents` plus one row per slot in
//! `document_fields`. Upserts replace all slots of a document inside one
//! transaction.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use deb_index_core::store::{SearchHit, Store};
use deb_index_core::{Document, IndexPolicy};

const STORED_POLICIES: &str = "('stored', 'stored+indexed')";
const INDEXED_POLICIES: &str = "('indexed', 'stored+indexed')";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn upsert_document(&self, id: &str, doc: &Document) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO documents (id, indexed_at) VALUES (?, ?)
            ON CONFLICT(id) DO UPDATE SET indexed_at = excluded.indexed_at
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM document_fields WHERE document_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (key, field) in doc.iter() {
            sqlx::query(
                "INSERT INTO document_fields (document_id, key, value, value_folded, policy) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(id)
            .bind(key)
            .bind(&field.value)
            .bind(field.value.to_lowercase())
            .bind(field.policy.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM documents WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(&format!(
            "SELECT key, value, policy FROM document_fields WHERE document_id = ? AND policy IN {}",
            STORED_POLICIES
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let mut doc = Document::new();
        for row in rows {
            let key: String = row.get("key");
            let value: String = row.get("value");
            let policy: String = row.get("policy");
            match IndexPolicy::parse(&policy) {
                Some(p) => doc.add(key, value, p),
                None => tracing::warn!(document = id, %key, %policy, "skipping slot with unknown policy"),
            }
        }
        Ok(Some(doc))
    }

    async fn search(&self, query: &str, key: Option<&str>, limit: i64) -> Result<Vec<SearchHit>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit < 1 {
            return Ok(Vec::new());
        }

        // First matching slot (by key) of each document, one row per
        // document, limited in SQL.
        let key_filter = if key.is_some() { " AND key = ?" } else { "" };
        let sql = format!(
            "SELECT f.document_id, f.key, f.value FROM document_fields f \
             JOIN ( \
                 SELECT document_id, MIN(key) AS key FROM document_fields \
                 WHERE policy IN {} AND instr(value_folded, ?) > 0{} \
                 GROUP BY document_id \
                 ORDER BY document_id \
                 LIMIT ? \
             ) m ON f.document_id = m.document_id AND f.key = m.key \
             ORDER BY f.document_id",
            INDEXED_POLICIES, key_filter
        );

        let mut q = sqlx::query(&sql).bind(&needle);
        if let Some(k) = key {
            q = q.bind(k);
        }
        let rows = q.bind(limit).fetch_all(&self.pool).await?;

        let hits = rows
            .into_iter()
            .map(|row| SearchHit {
                id: row.get("document_id"),
                key: row.get("key"),
                value: row.get("value"),
            })
            .collect();
        Ok(hits)
    }

    async fn count(&self) -> Result<i64> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}

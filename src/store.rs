// Document store over SQLite - all entities persist as typed JSON documents

use anyhow::Result;
use chrono::Utc;
use sqlx::{sqlite::SqlitePool, Row};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::cache::Cache;

/// A persisted document: typed, opaque JSON payload plus bookkeeping.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub id: i64,
    pub doc_type: String,
    pub data: Vec<u8>,
    pub created: i64,
    pub updated: i64,
}

// Async document store with SQLx connection pool and LRU caching.
// Documents live in one `documents` table; keyed lookups (unique email,
// per-student cart, content slug) go through the `doc_index` table.
pub struct Store {
    pub pool: SqlitePool,
    doc_cache: Arc<Mutex<Cache<i64, StoredDocument>>>,
    key_cache: Arc<Mutex<Cache<String, i64>>>,
}

impl Store {
    pub async fn new(database_url: &str, cache_capacity: usize) -> Result<Self> {
        let pool = SqlitePool::connect(database_url).await?;

        Ok(Store {
            pool,
            doc_cache: Arc::new(Mutex::new(Cache::new(cache_capacity))),
            key_cache: Arc::new(Mutex::new(Cache::new(cache_capacity))),
        })
    }

    pub async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                id INTEGER PRIMARY KEY,
                doc_type TEXT NOT NULL,
                data BLOB NOT NULL,
                created INTEGER NOT NULL,
                updated INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        // Keyed lookups: one row per (doc_type, field, value). The UNIQUE
        // constraint is the backstop for email/slug uniqueness.
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS doc_index (
                doc_type TEXT NOT NULL,
                field TEXT NOT NULL,
                value TEXT NOT NULL,
                doc_id INTEGER NOT NULL,
                created INTEGER NOT NULL,
                UNIQUE(doc_type, field, value)
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_type ON documents(doc_type)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_doc_index_doc ON doc_index(doc_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a document along with its index keys, atomically.
    pub async fn create_document(
        &self,
        doc_type: &str,
        data: &[u8],
        keys: &[(&str, &str)],
    ) -> Result<StoredDocument> {
        let now = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO documents (doc_type, data, created, updated) VALUES (?, ?, ?, ?)",
        )
        .bind(doc_type)
        .bind(data)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        for (field, value) in keys {
            sqlx::query(
                "INSERT INTO doc_index (doc_type, field, value, doc_id, created)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(doc_type)
            .bind(field)
            .bind(value)
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        let doc = StoredDocument {
            id,
            doc_type: doc_type.to_string(),
            data: data.to_vec(),
            created: now,
            updated: now,
        };

        self.doc_cache.lock().await.insert(id, doc.clone());
        for (field, value) in keys {
            let cache_key = format!("{}:{}:{}", doc_type, field, value);
            self.key_cache.lock().await.insert(cache_key, id);
        }

        Ok(doc)
    }

    pub async fn get_document(&self, id: i64, doc_type: &str) -> Result<Option<StoredDocument>> {
        // Check cache first
        {
            let mut cache = self.doc_cache.lock().await;
            if let Some(doc) = cache.get(&id).cloned() {
                if doc.doc_type == doc_type {
                    return Ok(Some(doc));
                }
                return Ok(None);
            }
        }

        let row = sqlx::query(
            "SELECT id, doc_type, data, created, updated FROM documents
             WHERE id = ? AND doc_type = ?",
        )
        .bind(id)
        .bind(doc_type)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let doc = StoredDocument {
                id: row.get("id"),
                doc_type: row.get("doc_type"),
                data: row.get("data"),
                created: row.get("created"),
                updated: row.get("updated"),
            };
            self.doc_cache.lock().await.insert(id, doc.clone());
            Ok(Some(doc))
        } else {
            Ok(None)
        }
    }

    pub async fn update_document(&self, id: i64, data: &[u8]) -> Result<()> {
        let now = Utc::now().timestamp();

        let result = sqlx::query("UPDATE documents SET data = ?, updated = ? WHERE id = ?")
            .bind(data)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("Document {} does not exist", id));
        }

        self.doc_cache.lock().await.remove(&id);

        Ok(())
    }

    /// Update a document and replace its index keys, atomically.
    pub async fn update_document_with_keys(
        &self,
        id: i64,
        doc_type: &str,
        data: &[u8],
        keys: &[(&str, &str)],
    ) -> Result<()> {
        let now = Utc::now().timestamp();

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE documents SET data = ?, updated = ? WHERE id = ?")
            .bind(data)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM doc_index WHERE doc_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (field, value) in keys {
            sqlx::query(
                "INSERT INTO doc_index (doc_type, field, value, doc_id, created)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(doc_type)
            .bind(field)
            .bind(value)
            .bind(id)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.doc_cache.lock().await.remove(&id);
        self.key_cache.lock().await.clear();

        Ok(())
    }

    /// Delete a document and its index rows, atomically.
    pub async fn delete_document(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM doc_index WHERE doc_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM documents WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.doc_cache.lock().await.remove(&id);
        self.key_cache.lock().await.clear();

        Ok(())
    }

    /// Keyed lookup, e.g. a center by email or a cart by student id.
    pub async fn find_by_key(
        &self,
        doc_type: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<i64>> {
        let cache_key = format!("{}:{}:{}", doc_type, field, value);
        {
            let mut cache = self.key_cache.lock().await;
            if let Some(id) = cache.get(&cache_key).copied() {
                return Ok(Some(id));
            }
        }

        let row = sqlx::query(
            "SELECT doc_id FROM doc_index WHERE doc_type = ? AND field = ? AND value = ?",
        )
        .bind(doc_type)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            let id: i64 = row.get("doc_id");
            self.key_cache.lock().await.insert(cache_key, id);
            Ok(Some(id))
        } else {
            Ok(None)
        }
    }

    /// List documents of a type, newest first. `None` returns everything;
    /// SQLite treats the negative LIMIT as unbounded.
    pub async fn list_by_type(&self, doc_type: &str, limit: Option<i32>) -> Result<Vec<StoredDocument>> {
        let limit = limit.unwrap_or(-1);

        let rows = sqlx::query(
            "SELECT id, doc_type, data, created, updated FROM documents
             WHERE doc_type = ? ORDER BY created DESC LIMIT ?",
        )
        .bind(doc_type)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut docs = Vec::new();
        for row in rows {
            docs.push(StoredDocument {
                id: row.get("id"),
                doc_type: row.get("doc_type"),
                data: row.get("data"),
                created: row.get("created"),
                updated: row.get("updated"),
            });
        }

        Ok(docs)
    }

    pub async fn count_by_type(&self, doc_type: &str) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) FROM documents WHERE doc_type = ?")
            .bind(doc_type)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get(0))
    }
}

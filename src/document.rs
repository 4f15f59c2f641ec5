// Typed document operations layered over the raw store

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// Every persisted entity implements this: a type tag plus the index keys
/// the store maintains for it (unique email, slug, owner id, ...).
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync {
    fn doc_type() -> &'static str;

    fn index_keys(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

#[allow(async_fn_in_trait)]
pub trait DocumentOps: Document + Sized {
    async fn gen_nullable(store: &Store, id: i64) -> AppResult<Option<(i64, Self)>> {
        if let Some(doc) = store.get_document(id, Self::doc_type()).await? {
            let entity: Self = serde_json::from_slice(&doc.data)?;
            return Ok(Some((doc.id, entity)));
        }
        Ok(None)
    }

    /// Like gen_nullable but a missing document is an error (404).
    async fn gen_enforce(store: &Store, id: i64) -> AppResult<(i64, Self)> {
        Self::gen_nullable(store, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {} not found", Self::doc_type(), id)))
    }

    async fn gen_all(store: &Store, limit: Option<i32>) -> AppResult<Vec<(i64, Self)>> {
        let docs = store.list_by_type(Self::doc_type(), limit).await?;
        let mut entities = Vec::new();
        for doc in docs {
            match serde_json::from_slice::<Self>(&doc.data) {
                Ok(entity) => entities.push((doc.id, entity)),
                Err(e) => {
                    // Skip undecodable rows instead of failing the listing
                    tracing::warn!("Failed to decode {} {}: {}", Self::doc_type(), doc.id, e);
                }
            }
        }
        Ok(entities)
    }

    async fn find_by_key(store: &Store, field: &str, value: &str) -> AppResult<Option<(i64, Self)>> {
        match store.find_by_key(Self::doc_type(), field, value).await? {
            Some(id) => Self::gen_nullable(store, id).await,
            None => Ok(None),
        }
    }

    async fn create(store: &Store, entity: &Self) -> AppResult<i64> {
        let data = serde_json::to_vec(entity)?;
        let keys = entity.index_keys();
        let key_refs: Vec<(&str, &str)> = keys
            .iter()
            .map(|(f, v)| (f.as_str(), v.as_str()))
            .collect();
        let doc = store.create_document(Self::doc_type(), &data, &key_refs).await?;
        Ok(doc.id)
    }

    async fn update(store: &Store, id: i64, entity: &Self) -> AppResult<()> {
        let data = serde_json::to_vec(entity)?;
        let keys = entity.index_keys();
        if keys.is_empty() {
            store.update_document(id, &data).await?;
        } else {
            let key_refs: Vec<(&str, &str)> = keys
                .iter()
                .map(|(f, v)| (f.as_str(), v.as_str()))
                .collect();
            store
                .update_document_with_keys(id, Self::doc_type(), &data, &key_refs)
                .await?;
        }
        Ok(())
    }

    async fn delete(store: &Store, id: i64) -> AppResult<()> {
        // Enforce existence so deletes of missing documents report 404
        Self::gen_enforce(store, id).await?;
        store.delete_document(id).await?;
        Ok(())
    }
}

impl<T: Document> DocumentOps for T {}

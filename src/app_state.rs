use std::sync::Arc;

use crate::config::Config;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        // Initialize the document store
        let store = Store::new(&config.database.url, config.cache.capacity).await?;
        store.init().await?;
        let store = Arc::new(store);

        Ok(Self { store, config })
    }
}

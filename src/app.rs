use error_stack::{Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::{
  config, database,
  store::{MemoryStore, Store},
};

/// Handle to everything a request needs. It's cheap to clone and it
/// is opened once at startup and closed once at shutdown.
#[derive(Debug, Clone)]
pub struct App {
  pub config: Arc<config::Server>,
  store: Arc<dyn Store>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
  #[tracing::instrument(skip(cfg))]
  pub async fn new(cfg: config::Server) -> Result<Self, AppError> {
    let store: Arc<dyn Store> = if let Some(db) = cfg.db.as_ref() {
      let pool = database::Pool::new(db).await.change_context(AppError)?;
      pool.migrate().await.change_context(AppError)?;
      Arc::new(pool)
    } else {
      tracing::warn!("no database is configured, every note will be lost on shutdown");
      Arc::new(MemoryStore::new())
    };

    Ok(Self::with_store(cfg, store))
  }

  #[must_use]
  pub fn with_store(cfg: config::Server, store: Arc<dyn Store>) -> Self {
    Self {
      config: Arc::new(cfg),
      store,
    }
  }
}

impl App {
  #[must_use]
  pub fn store(&self) -> &dyn Store {
    &*self.store
  }

  #[tracing::instrument(skip(self))]
  pub async fn close(&self) {
    self.store.close().await;
  }
}

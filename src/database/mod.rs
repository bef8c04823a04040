use error_stack::{Report, ResultExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::{str::FromStr, time::Duration};

use crate::config;

pub mod error;
pub use error::{Error, ErrorExt, ReportExt, Result};

pub type PoolConnection = sqlx::pool::PoolConnection<sqlx::Postgres>;
pub type Connection = sqlx::PgConnection;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(Clone)]
pub struct Pool {
  pool: sqlx::PgPool,
}

impl Pool {
  #[tracing::instrument(skip_all, name = "db.open")]
  pub async fn new(cfg: &config::Database) -> Result<Self> {
    let mut pool_opts = PgPoolOptions::new()
      .acquire_timeout(Duration::from_secs(cfg.timeout_secs.get()))
      .max_connections(cfg.pool_size.get());

    if let Some(min_idle) = cfg.min_idle {
      pool_opts = pool_opts.min_connections(min_idle.get());
    }

    let mut connect_opts =
      PgConnectOptions::from_str(cfg.url.as_str()).change_context(Error::InvalidUrl)?;

    if cfg.enforce_tls {
      connect_opts = connect_opts.ssl_mode(PgSslMode::Require);
    }

    let pool = Self {
      pool: pool_opts.connect_lazy_with(connect_opts),
    };

    pool.wait_until_healthy().await?;
    Ok(pool)
  }
}

impl From<sqlx::PgPool> for Pool {
  fn from(pool: sqlx::PgPool) -> Self {
    Self { pool }
  }
}

impl std::fmt::Debug for Pool {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.pool.fmt(f)
  }
}

impl Pool {
  #[inline(always)]
  pub fn connections(&self) -> u32 {
    self.pool.size()
  }

  #[inline(always)]
  pub fn is_healthy(&self) -> bool {
    self.connections() > 0
  }

  #[tracing::instrument(name = "db.connect", skip(self))]
  pub async fn get(&self) -> Result<PoolConnection> {
    if let Some(inner) = self.pool.try_acquire() {
      Ok(inner)
    } else {
      let result = self.pool.acquire().await;
      result.map_err(|e| {
        if self.is_healthy() {
          Report::new(Error::Internal(e))
        } else {
          Report::new(e).change_context(Error::UnhealthyPool)
        }
      })
    }
  }

  #[tracing::instrument(skip(self))]
  pub async fn wait_until_healthy(&self) -> Result<()> {
    match self.pool.acquire().await {
      Ok(..) => Ok(()),
      Err(e) if !self.is_healthy() => Err(e).change_context(Error::UnhealthyPool),
      Err(err) => Err(Report::new(Error::Internal(err))),
    }
  }

  /// Applies every migration under `migrations/` that has not been
  /// applied to the database yet.
  #[tracing::instrument(name = "db.migrate", skip(self))]
  pub async fn migrate(&self) -> Result<()> {
    MIGRATOR
      .run(&self.pool)
      .await
      .change_context(Error::Migration)
  }

  #[tracing::instrument(name = "db.close", skip(self))]
  pub async fn close(&self) {
    self.pool.close().await;
  }
}

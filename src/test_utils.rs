use std::{
  net::{IpAddr, Ipv4Addr},
  num::NonZeroU64,
  sync::Arc,
};

use crate::{
  config,
  services::users::Register,
  store::{MemoryStore, Store},
  types::form::users::Session,
  util::Sensitive,
  App,
};

pub const TEST_JWT_SECRET: &str = "jotter test secret, do not use";

pub fn build_test_app() -> App {
  build_test_app_with_secret(TEST_JWT_SECRET)
}

pub fn build_test_app_with_secret(secret: &str) -> App {
  App::with_store(test_config(secret), Arc::new(MemoryStore::new()))
}

/// Same as [`build_test_app`] but backed by another store, like a
/// Postgres pool handed out by `sqlx::test`.
pub fn build_test_app_with_store(store: Arc<dyn Store>) -> App {
  App::with_store(test_config(TEST_JWT_SECRET), store)
}

fn test_config(secret: &str) -> config::Server {
  crate::telemetry::init_for_tests();

  config::Server {
    ip: IpAddr::V4(Ipv4Addr::LOCALHOST),
    port: 0,
    workers: 1,
    db: None,
    auth: config::Auth {
      jwt_secret: secret.to_string().into(),
      token_ttl_secs: NonZeroU64::new(30 * 60).unwrap(),
    },
  }
}

pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Registers a user named after the email with [`TEST_PASSWORD`].
pub async fn register(app: &App, email: &str) -> Session {
  Register {
    full_name: email,
    email: Sensitive::new(email),
    password: Sensitive::new(TEST_PASSWORD),
  }
  .perform(app)
  .await
  .unwrap()
}

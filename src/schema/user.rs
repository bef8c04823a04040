use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  types::id::UserId,
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: UserId,
  pub created_at: NaiveDateTime,
  pub full_name: String,
  pub email: String,
  #[serde(skip)]
  pub password_hash: String,
}

impl User {
  #[tracing::instrument(skip(conn), name = "db.users.find")]
  pub async fn find(conn: &mut Connection, id: UserId) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip(conn, email), fields(email = "<hidden>"), name = "db.users.find_by_email")]
  pub async fn find_by_email(conn: &mut Connection, email: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
      .bind(email)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }
}

pub struct InsertUser<'a> {
  pub full_name: &'a str,
  pub email: &'a str,
  pub password_hash: &'a str,
}

impl std::fmt::Debug for InsertUser<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("InsertUser")
      .field("full_name", &self.full_name)
      .finish_non_exhaustive()
  }
}

impl InsertUser<'_> {
  #[tracing::instrument(skip(conn), name = "db.users.insert")]
  pub async fn insert(&self, conn: &mut Connection) -> Result<User> {
    sqlx::query_as::<_, User>(
      r#"INSERT INTO "users" (full_name, email, password_hash)
         VALUES ($1, $2, $3)
         RETURNING *"#,
    )
    .bind(self.full_name)
    .bind(self.email)
    .bind(self.password_hash)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}

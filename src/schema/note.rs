use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

use crate::{
  database::{error::ErrorExt, Connection, Result},
  types::id::{NoteId, UserId},
};

#[derive(Debug, Clone, FromRow, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
  pub id: NoteId,
  pub created_at: NaiveDateTime,
  pub owner_id: UserId,
  pub title: String,
  pub content: String,
  pub tags: Vec<String>,
  pub is_pinned: bool,
}

impl Note {
  /// Pinned notes come first, then the newest ones.
  #[tracing::instrument(skip(conn), name = "db.notes.list")]
  pub async fn list_for_owner(conn: &mut Connection, owner_id: UserId) -> Result<Vec<Self>> {
    sqlx::query_as::<_, Self>(
      r#"SELECT * FROM "notes" WHERE owner_id = $1
         ORDER BY is_pinned DESC, created_at DESC, id DESC"#,
    )
    .bind(owner_id)
    .fetch_all(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn), name = "db.notes.delete")]
  pub async fn delete(conn: &mut Connection, id: NoteId, owner_id: UserId) -> Result<bool> {
    sqlx::query(r#"DELETE FROM "notes" WHERE id = $1 AND owner_id = $2"#)
      .bind(id)
      .bind(owner_id)
      .execute(conn)
      .await
      .into_db_error()
      .map(|v| v.rows_affected() > 0)
  }
}

#[derive(Debug)]
pub struct InsertNote<'a> {
  pub owner_id: UserId,
  pub title: &'a str,
  pub content: &'a str,
  pub tags: &'a [String],
  pub is_pinned: bool,
}

impl InsertNote<'_> {
  #[tracing::instrument(skip(conn), name = "db.notes.insert")]
  pub async fn insert(&self, conn: &mut Connection) -> Result<Note> {
    sqlx::query_as::<_, Note>(
      r#"INSERT INTO "notes" (owner_id, title, content, tags, is_pinned)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING *"#,
    )
    .bind(self.owner_id)
    .bind(self.title)
    .bind(self.content)
    .bind(self.tags)
    .bind(self.is_pinned)
    .fetch_one(conn)
    .await
    .into_db_error()
  }
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UpdateNote {
  pub title: Option<String>,
  pub content: Option<String>,
  pub tags: Option<Vec<String>>,
  pub is_pinned: Option<bool>,
}

impl UpdateNote {
  /// Applies the changes to an already loaded note.
  pub fn apply_to(&self, note: &mut Note) {
    if let Some(title) = self.title.as_ref() {
      note.title.clone_from(title);
    }
    if let Some(content) = self.content.as_ref() {
      note.content.clone_from(content);
    }
    if let Some(tags) = self.tags.as_ref() {
      note.tags.clone_from(tags);
    }
    if let Some(is_pinned) = self.is_pinned {
      note.is_pinned = is_pinned;
    }
  }

  /// Returns `None` if there's no note with that id owned by `owner_id`.
  #[tracing::instrument(skip(conn), name = "db.notes.update")]
  pub async fn update(
    &self,
    conn: &mut Connection,
    id: NoteId,
    owner_id: UserId,
  ) -> Result<Option<Note>> {
    sqlx::query_as::<_, Note>(
      r#"UPDATE "notes"
         SET title = COALESCE($3, title),
             content = COALESCE($4, content),
             tags = COALESCE($5, tags),
             is_pinned = COALESCE($6, is_pinned)
         WHERE id = $1 AND owner_id = $2
         RETURNING *"#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(self.title.as_deref())
    .bind(self.content.as_deref())
    .bind(self.tags.as_deref())
    .bind(self.is_pinned)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::schema::InsertUser;
  use chrono::NaiveDate;
  use sqlx::PgPool;

  async fn insert_user(conn: &mut Connection, email: &str) -> UserId {
    InsertUser {
      full_name: "Jane Doe",
      email,
      password_hash: "hash",
    }
    .insert(conn)
    .await
    .unwrap()
    .id
  }

  async fn insert_note(
    conn: &mut Connection,
    owner_id: UserId,
    title: &str,
    is_pinned: bool,
  ) -> Note {
    InsertNote {
      owner_id,
      title,
      content: "Milk",
      tags: &["home".to_string(), "errands".to_string()],
      is_pinned,
    }
    .insert(conn)
    .await
    .unwrap()
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server in DATABASE_URL"]
  async fn test_insert_keeps_tags(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let owner_id = insert_user(&mut conn, "jane@example.com").await;

    let note = insert_note(&mut conn, owner_id, "Groceries", true).await;
    assert_eq!(note.owner_id, owner_id);
    assert_eq!(note.tags, vec!["home".to_string(), "errands".to_string()]);
    assert!(note.is_pinned);

    let empty = InsertNote {
      owner_id,
      title: "Empty",
      content: "C",
      tags: &[],
      is_pinned: false,
    }
    .insert(&mut conn)
    .await
    .unwrap();
    assert!(empty.tags.is_empty());
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server in DATABASE_URL"]
  async fn test_partial_update(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let owner_id = insert_user(&mut conn, "jane@example.com").await;
    let note = insert_note(&mut conn, owner_id, "Groceries", true).await;

    let updated = UpdateNote {
      title: Some("Errands".into()),
      ..Default::default()
    }
    .update(&mut conn, note.id, owner_id)
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.title, "Errands");
    assert_eq!(updated.content, note.content);
    assert_eq!(updated.tags, note.tags);
    assert!(updated.is_pinned);

    let updated = UpdateNote {
      tags: Some(Vec::new()),
      is_pinned: Some(false),
      ..Default::default()
    }
    .update(&mut conn, note.id, owner_id)
    .await
    .unwrap()
    .unwrap();

    assert!(updated.tags.is_empty());
    assert!(!updated.is_pinned);
    assert_eq!(updated.title, "Errands");
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server in DATABASE_URL"]
  async fn test_scoped_by_owner(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let alice = insert_user(&mut conn, "alice@example.com").await;
    let bob = insert_user(&mut conn, "bob@example.com").await;
    let note = insert_note(&mut conn, alice, "Groceries", false).await;

    let changes = UpdateNote {
      title: Some("Mine now".into()),
      ..Default::default()
    };
    assert!(changes.update(&mut conn, note.id, bob).await.unwrap().is_none());
    assert!(Note::list_for_owner(&mut conn, bob).await.unwrap().is_empty());
    assert!(!Note::delete(&mut conn, note.id, bob).await.unwrap());

    assert!(Note::delete(&mut conn, note.id, alice).await.unwrap());
    assert!(!Note::delete(&mut conn, note.id, alice).await.unwrap());
    assert!(Note::list_for_owner(&mut conn, alice).await.unwrap().is_empty());
  }

  #[sqlx::test(migrations = "./migrations")]
  #[ignore = "needs a Postgres server in DATABASE_URL"]
  async fn test_list_order(pool: PgPool) {
    let mut conn = pool.acquire().await.unwrap();
    let owner_id = insert_user(&mut conn, "jane@example.com").await;

    let first = insert_note(&mut conn, owner_id, "1", false).await;
    let pinned = insert_note(&mut conn, owner_id, "2", true).await;
    let last = insert_note(&mut conn, owner_id, "3", false).await;

    let ids = Note::list_for_owner(&mut conn, owner_id)
      .await
      .unwrap()
      .into_iter()
      .map(|v| v.id)
      .collect::<Vec<_>>();

    assert_eq!(ids, vec![pinned.id, last.id, first.id]);
  }

  fn note() -> Note {
    Note {
      id: NoteId::new(1),
      created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap(),
      owner_id: UserId::new(1),
      title: "Groceries".into(),
      content: "Milk".into(),
      tags: vec!["home".into()],
      is_pinned: true,
    }
  }

  #[test]
  fn test_apply_only_given_fields() {
    let mut value = note();
    UpdateNote {
      title: Some("Errands".into()),
      ..Default::default()
    }
    .apply_to(&mut value);

    assert_eq!(value.title, "Errands");
    assert_eq!(value.content, "Milk");
    assert_eq!(value.tags, vec!["home".to_string()]);
    assert!(value.is_pinned);
  }

  #[test]
  fn test_apply_falsy_values() {
    let mut value = note();
    UpdateNote {
      tags: Some(Vec::new()),
      is_pinned: Some(false),
      ..Default::default()
    }
    .apply_to(&mut value);

    assert!(value.tags.is_empty());
    assert!(!value.is_pinned);
  }

  #[test]
  fn test_serialized_in_camel_case() {
    let value = serde_json::to_value(note()).unwrap();
    assert_eq!(value["ownerId"], "1");
    assert_eq!(value["isPinned"], true);
    assert_eq!(value["tags"], serde_json::json!(["home"]));
  }
}

use async_trait::async_trait;

use super::Store;
use crate::{
  database::{Pool, Result},
  schema::{InsertNote, InsertUser, Note, UpdateNote, User},
  types::id::{NoteId, UserId},
};

#[async_trait]
impl Store for Pool {
  async fn find_user(&self, id: UserId) -> Result<Option<User>> {
    let mut conn = self.get().await?;
    User::find(&mut *conn, id).await
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let mut conn = self.get().await?;
    User::find_by_email(&mut *conn, email).await
  }

  async fn insert_user(&self, full_name: &str, email: &str, password_hash: &str) -> Result<User> {
    let mut conn = self.get().await?;
    InsertUser {
      full_name,
      email,
      password_hash,
    }
    .insert(&mut *conn)
    .await
  }

  async fn insert_note(
    &self,
    owner_id: UserId,
    title: &str,
    content: &str,
    tags: &[String],
    is_pinned: bool,
  ) -> Result<Note> {
    let mut conn = self.get().await?;
    InsertNote {
      owner_id,
      title,
      content,
      tags,
      is_pinned,
    }
    .insert(&mut *conn)
    .await
  }

  async fn update_note(
    &self,
    id: NoteId,
    owner_id: UserId,
    changes: &UpdateNote,
  ) -> Result<Option<Note>> {
    let mut conn = self.get().await?;
    changes.update(&mut *conn, id, owner_id).await
  }

  async fn list_notes(&self, owner_id: UserId) -> Result<Vec<Note>> {
    let mut conn = self.get().await?;
    Note::list_for_owner(&mut *conn, owner_id).await
  }

  async fn delete_note(&self, id: NoteId, owner_id: UserId) -> Result<bool> {
    let mut conn = self.get().await?;
    Note::delete(&mut *conn, id, owner_id).await
  }

  async fn close(&self) {
    Pool::close(self).await;
  }
}

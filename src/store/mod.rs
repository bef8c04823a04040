use async_trait::async_trait;

use crate::{
  database::Result,
  schema::{Note, UpdateNote, User},
  types::id::{NoteId, UserId},
};

mod memory;
mod postgres;

pub use memory::MemoryStore;

/// Where users and their notes are kept.
///
/// Every note operation is scoped by its owner, so a note that exists
/// but belongs to someone else looks exactly like a missing one.
#[async_trait]
pub trait Store: std::fmt::Debug + Send + Sync {
  async fn find_user(&self, id: UserId) -> Result<Option<User>>;
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  /// Fails with [`database::Error::UniqueViolation`] if the email is
  /// already registered.
  ///
  /// [`database::Error::UniqueViolation`]: crate::database::Error::UniqueViolation
  async fn insert_user(&self, full_name: &str, email: &str, password_hash: &str) -> Result<User>;

  async fn insert_note(
    &self,
    owner_id: UserId,
    title: &str,
    content: &str,
    tags: &[String],
    is_pinned: bool,
  ) -> Result<Note>;

  async fn update_note(
    &self,
    id: NoteId,
    owner_id: UserId,
    changes: &UpdateNote,
  ) -> Result<Option<Note>>;

  /// Pinned notes first, then the newest ones.
  async fn list_notes(&self, owner_id: UserId) -> Result<Vec<Note>>;

  /// Returns `false` if nothing was deleted.
  async fn delete_note(&self, id: NoteId, owner_id: UserId) -> Result<bool>;

  async fn close(&self);
}

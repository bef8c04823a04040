use async_trait::async_trait;
use chrono::Utc;
use error_stack::Report;
use std::{collections::BTreeMap, num::NonZeroU64};
use tokio::sync::RwLock;

use super::Store;
use crate::{
  database::{Error, Result},
  schema::{Note, UpdateNote, User},
  types::id::{NoteId, UserId},
};

/// Keeps everything in the process. Used by tests and by servers
/// started without a database; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
  users: RwLock<Table<User>>,
  notes: RwLock<Table<Note>>,
}

#[derive(Debug)]
struct Table<T> {
  rows: BTreeMap<u64, T>,
  last_id: Option<NonZeroU64>,
}

impl<T> Default for Table<T> {
  fn default() -> Self {
    Self {
      rows: BTreeMap::new(),
      last_id: None,
    }
  }
}

impl<T> Table<T> {
  fn next_id(&mut self) -> NonZeroU64 {
    let id = self
      .last_id
      .map_or(NonZeroU64::MIN, |v| v.saturating_add(1));

    self.last_id = Some(id);
    id
  }
}

impl MemoryStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl Store for MemoryStore {
  async fn find_user(&self, id: UserId) -> Result<Option<User>> {
    Ok(self.users.read().await.rows.get(&id.get()).cloned())
  }

  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let users = self.users.read().await;
    Ok(users.rows.values().find(|v| v.email == email).cloned())
  }

  async fn insert_user(&self, full_name: &str, email: &str, password_hash: &str) -> Result<User> {
    let mut users = self.users.write().await;
    if users.rows.values().any(|v| v.email == email) {
      return Err(Report::new(Error::UniqueViolation).attach_printable("users.email"));
    }

    let user = User {
      id: UserId::from_nonzero(users.next_id()),
      created_at: Utc::now().naive_utc(),
      full_name: full_name.to_string(),
      email: email.to_string(),
      password_hash: password_hash.to_string(),
    };
    users.rows.insert(user.id.get(), user.clone());

    Ok(user)
  }

  async fn insert_note(
    &self,
    owner_id: UserId,
    title: &str,
    content: &str,
    tags: &[String],
    is_pinned: bool,
  ) -> Result<Note> {
    let mut notes = self.notes.write().await;
    let note = Note {
      id: NoteId::from_nonzero(notes.next_id()),
      created_at: Utc::now().naive_utc(),
      owner_id,
      title: title.to_string(),
      content: content.to_string(),
      tags: tags.to_vec(),
      is_pinned,
    };
    notes.rows.insert(note.id.get(), note.clone());

    Ok(note)
  }

  async fn update_note(
    &self,
    id: NoteId,
    owner_id: UserId,
    changes: &UpdateNote,
  ) -> Result<Option<Note>> {
    let mut notes = self.notes.write().await;
    let Some(note) = notes
      .rows
      .get_mut(&id.get())
      .filter(|v| v.owner_id == owner_id)
    else {
      return Ok(None);
    };

    changes.apply_to(note);
    Ok(Some(note.clone()))
  }

  async fn list_notes(&self, owner_id: UserId) -> Result<Vec<Note>> {
    let notes = self.notes.read().await;
    let mut owned = notes
      .rows
      .values()
      .filter(|v| v.owner_id == owner_id)
      .cloned()
      .collect::<Vec<_>>();

    owned.sort_by(|a, b| {
      b.is_pinned
        .cmp(&a.is_pinned)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
    });

    Ok(owned)
  }

  async fn delete_note(&self, id: NoteId, owner_id: UserId) -> Result<bool> {
    let mut notes = self.notes.write().await;
    let owned = notes
      .rows
      .get(&id.get())
      .is_some_and(|v| v.owner_id == owner_id);

    if owned {
      notes.rows.remove(&id.get());
    }
    Ok(owned)
  }

  async fn close(&self) {}
}

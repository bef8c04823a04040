use super::NoteNotFound;
use crate::{
  schema::{Note, UpdateNote},
  types::{
    self,
    id::{NoteId, UserId},
    validation::normalize_tags,
  },
  App, Error, Result,
};

#[derive(Debug)]
pub struct EditNote {
  pub id: NoteId,
  pub owner_id: UserId,
  pub changes: UpdateNote,
}

impl EditNote {
  #[tracing::instrument(skip(app), name = "services.notes.edit")]
  pub async fn perform(mut self, app: &App) -> Result<Note> {
    if let Some(tags) = self.changes.tags.take() {
      self.changes.tags = Some(normalize_tags(tags));
    }
    if let Some(title) = self.changes.title.as_mut() {
      *title = title.trim().to_string();
    }

    app
      .store()
      .update_note(self.id, self.owner_id, &self.changes)
      .await?
      .ok_or_else(|| Error::from_context(types::Error::NoteNotFound, NoteNotFound))
  }
}

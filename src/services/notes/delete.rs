use super::NoteNotFound;
use crate::{
  types::{
    self,
    id::{NoteId, UserId},
  },
  App, Error, Result,
};

#[derive(Debug)]
pub struct DeleteNote {
  pub id: NoteId,
  pub owner_id: UserId,
}

impl DeleteNote {
  #[tracing::instrument(skip(app), name = "services.notes.delete")]
  pub async fn perform(self, app: &App) -> Result<()> {
    if app.store().delete_note(self.id, self.owner_id).await? {
      Ok(())
    } else {
      Err(Error::from_context(types::Error::NoteNotFound, NoteNotFound))
    }
  }
}

use crate::{schema::Note, types::id::UserId, App, Result};

#[derive(Debug)]
pub struct ListNotes {
  pub owner_id: UserId,
}

impl ListNotes {
  #[tracing::instrument(skip(app), name = "services.notes.list")]
  pub async fn perform(self, app: &App) -> Result<Vec<Note>> {
    Ok(app.store().list_notes(self.owner_id).await?)
  }
}

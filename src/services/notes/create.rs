use crate::{
  schema::Note,
  types::{id::UserId, validation::normalize_tags},
  App, Result,
};

#[derive(Debug)]
pub struct CreateNote<'a> {
  pub owner_id: UserId,
  pub title: &'a str,
  pub content: &'a str,
  pub tags: Option<&'a [String]>,
  pub is_pinned: Option<bool>,
}

impl CreateNote<'_> {
  #[tracing::instrument(skip(app), name = "services.notes.create")]
  pub async fn perform(self, app: &App) -> Result<Note> {
    let tags = normalize_tags(self.tags.unwrap_or_default());
    let note = app
      .store()
      .insert_note(
        self.owner_id,
        self.title.trim(),
        self.content,
        &tags,
        self.is_pinned.unwrap_or(false),
      )
      .await?;

    Ok(note)
  }
}

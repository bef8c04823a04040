use actix_web::{web, HttpResponse};
use thiserror::Error;
use validator::Validate;

use crate::{
  http::SessionUser,
  schema::UpdateNote,
  services::notes::{CreateNote, DeleteNote, EditNote, ListNotes},
  types::{
    self,
    form::{
      notes::{create, edit, List, Single},
      Empty, Envelope,
    },
    id::NoteId,
  },
  App, Error, Result,
};

#[derive(Debug, Error)]
#[error("Invalid note id")]
struct InvalidNoteId;

/// Ids that can't possibly exist are reported like missing notes.
fn parse_note_id(value: &str) -> Result<NoteId> {
  value
    .parse::<NoteId>()
    .map_err(|_| Error::from_context(types::Error::NoteNotFound, InvalidNoteId))
}

#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn add(
  app: web::Data<App>,
  user: SessionUser,
  form: web::Json<create::Request>,
) -> Result<HttpResponse> {
  form.validate()?;

  let note = CreateNote {
    owner_id: user.id,
    title: &form.title,
    content: &form.content,
    tags: form.tags.as_deref(),
    is_pinned: form.is_pinned,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(Envelope::ok("Note created successfully", Single { note })))
}

#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn edit(
  app: web::Data<App>,
  user: SessionUser,
  path: web::Path<String>,
  form: web::Json<edit::Request>,
) -> Result<HttpResponse> {
  let id = parse_note_id(&path)?;
  form.validate()?;

  let form = form.into_inner();
  let note = EditNote {
    id,
    owner_id: user.id,
    changes: UpdateNote {
      title: form.title,
      content: form.content,
      tags: form.tags,
      is_pinned: form.is_pinned,
    },
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(Envelope::ok("Note updated successfully", Single { note })))
}

#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn list(app: web::Data<App>, user: SessionUser) -> Result<HttpResponse> {
  let notes = ListNotes { owner_id: user.id }.perform(&app).await?;
  Ok(HttpResponse::Ok().json(Envelope::ok("Notes fetched successfully", List { notes })))
}

#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn delete(
  app: web::Data<App>,
  user: SessionUser,
  path: web::Path<String>,
) -> Result<HttpResponse> {
  let id = parse_note_id(&path)?;
  DeleteNote {
    id,
    owner_id: user.id,
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(Envelope::ok("Note deleted successfully", Empty {})))
}

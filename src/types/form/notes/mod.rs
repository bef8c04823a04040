use serde::Serialize;

use crate::schema::Note;

pub mod create;
pub mod edit;

#[derive(Debug, Serialize)]
pub struct Single {
  pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct List {
  pub notes: Vec<Note>,
}

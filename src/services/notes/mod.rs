use thiserror::Error;

mod create;
mod delete;
mod edit;
mod list;

pub use create::CreateNote;
pub use delete::DeleteNote;
pub use edit::EditNote;
pub use list::ListNotes;

/// Also used for notes owned by someone else.
#[derive(Debug, Error)]
#[error("Note does not exist")]
struct NoteNotFound;

mod note;
mod user;

pub use note::{InsertNote, Note, UpdateNote};
pub use user::{InsertUser, User};

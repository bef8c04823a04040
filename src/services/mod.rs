//! Business logic of every operation, independent from HTTP.
//!
//! Each operation is a struct holding its input with a `perform`
//! method that runs it against an [`App`](crate::App).
pub mod notes;
pub mod users;

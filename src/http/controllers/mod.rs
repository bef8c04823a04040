use actix_web::{web, HttpResponse};
use thiserror::Error;

use crate::{types, Error};

mod index;
pub mod notes;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/", web::get().to(index::index))
    .route("/create-account", web::post().to(users::create_account))
    .route("/login", web::post().to(users::login))
    .route("/get-user", web::get().to(users::get_user))
    .route("/add-note", web::post().to(notes::add))
    .route("/edit-note/{note_id}", web::put().to(notes::edit))
    .route("/get-all-notes", web::get().to(notes::list))
    .route("/delete-note/{note_id}", web::delete().to(notes::delete))
    .default_service(web::to(not_found));
}

#[derive(Debug, Error)]
#[error("No route matched")]
struct NoRoute;

async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::from_context(types::Error::NotFound, NoRoute))
}

#[cfg(test)]
mod tests;

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
  http::SessionUser,
  services::users::{Login, Register},
  types::form::{
    users::{login, register, Profile},
    Envelope,
  },
  App, Result,
};

#[tracing::instrument(skip_all)]
pub async fn create_account(
  app: web::Data<App>,
  form: web::Json<register::Request>,
) -> Result<HttpResponse> {
  form.validate()?;

  let session = Register {
    full_name: &form.full_name,
    email: form.email.as_deref(),
    password: form.password.as_deref(),
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(Envelope::ok("User created successfully", session)))
}

#[tracing::instrument(skip_all)]
pub async fn login(app: web::Data<App>, form: web::Json<login::Request>) -> Result<HttpResponse> {
  form.validate()?;

  let session = Login {
    email: form.email.as_deref(),
    password: form.password.as_deref(),
  }
  .perform(&app)
  .await?;

  Ok(HttpResponse::Ok().json(Envelope::ok("User logged in successfully", session)))
}

#[tracing::instrument(skip_all, fields(user.id = %user.id))]
pub async fn get_user(user: SessionUser) -> Result<HttpResponse> {
  let profile = Profile {
    user: user.into_inner(),
  };
  Ok(HttpResponse::Ok().json(Envelope::ok("User fetched successfully", profile)))
}

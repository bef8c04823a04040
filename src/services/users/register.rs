use thiserror::Error;
use tokio::task::spawn_blocking;

use crate::{
  auth::{password, LoginClaims},
  database::ReportExt,
  error::ResultExt,
  types::{self, form::users::Session},
  util::Sensitive,
  App, Error, Result,
};

#[derive(Debug)]
pub struct Register<'a> {
  pub full_name: &'a str,
  pub email: Sensitive<&'a str>,
  pub password: Sensitive<&'a str>,
}

#[derive(Debug, Error)]
#[error("Email is already registered")]
struct EmailTaken;

impl Register<'_> {
  #[tracing::instrument(skip(app), name = "services.users.register")]
  pub async fn perform(self, app: &App) -> Result<Session> {
    let email = self.email.value().trim();
    if app.store().find_user_by_email(email).await?.is_some() {
      return Err(Error::from_context(types::Error::EmailTaken, EmailTaken));
    }

    let password = self.password.value().to_string();
    let password_hash = spawn_blocking(move || password::hash(password))
      .await
      .map_err(|e| Error::from_context(types::Error::Internal, e))?
      .or_internal()?;

    // Someone else may have taken the email in the meantime
    let user = match app
      .store()
      .insert_user(self.full_name.trim(), email, &password_hash)
      .await
    {
      Ok(user) => user,
      Err(report) if report.is_unique_violation() => {
        return Err(Error::from_report(types::Error::EmailTaken, report));
      }
      Err(report) => return Err(report.into()),
    };

    let access_token = LoginClaims::generate(app, &user).encode(app).or_internal()?;
    Ok(Session {
      user,
      access_token: Sensitive::new(access_token),
    })
  }
}

use thiserror::Error;
use tokio::task::spawn_blocking;

use crate::{
  auth::{password, LoginClaims},
  error::ResultExt,
  types::{self, form::users::Session},
  util::Sensitive,
  App, Error, Result,
};

#[derive(Debug)]
pub struct Login<'a> {
  pub email: Sensitive<&'a str>,
  pub password: Sensitive<&'a str>,
}

#[derive(Debug, Error)]
#[error("Could not log in")]
struct LoginFailed;

impl Login<'_> {
  #[tracing::instrument(skip(app), name = "services.users.login")]
  pub async fn perform(self, app: &App) -> Result<Session> {
    let email = self.email.value().trim();
    let Some(user) = app.store().find_user_by_email(email).await? else {
      return Err(Error::from_context(types::Error::UserNotFound, LoginFailed));
    };

    let password = self.password.value().to_string();
    let hash = user.password_hash.clone();
    let is_matched = spawn_blocking(move || password::verify(password, &hash))
      .await
      .map_err(|e| Error::from_context(types::Error::Internal, e))?
      .or_internal()?;

    if !is_matched {
      return Err(Error::from_context(types::Error::InvalidCredentials, LoginFailed));
    }

    let access_token = LoginClaims::generate(app, &user).encode(app).or_internal()?;
    Ok(Session {
      user,
      access_token: Sensitive::new(access_token),
    })
  }
}

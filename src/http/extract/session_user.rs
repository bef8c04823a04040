use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures::future::{ready, LocalBoxFuture};
use std::ops::Deref;
use thiserror::Error;

use crate::{auth::LoginClaims, schema::User, types, App, Error};

/// The user behind the bearer token of the request. Routes taking
/// this reject anonymous requests with `401 Unauthorized`.
#[derive(Debug)]
pub struct SessionUser(User);

impl SessionUser {
  #[must_use]
  pub fn into_inner(self) -> User {
    self.0
  }
}

impl Deref for SessionUser {
  type Target = User;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

#[derive(Debug, Error)]
#[error("Attempt to access user-only route")]
struct Unauthorized;

fn bearer_token(req: &HttpRequest) -> Option<&str> {
  let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
  let (scheme, token) = value.trim().split_once(' ')?;
  let token = token.trim();
  (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

impl FromRequest for SessionUser {
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(app) = req.app_data::<web::Data<App>>().cloned() else {
      #[derive(Debug, Error)]
      #[error("The web app has no available configuration")]
      struct NoConfig;
      return Box::pin(ready(Err(Error::from_context(
        types::Error::Internal,
        NoConfig,
      ))));
    };

    let Some(token) = bearer_token(req).map(str::to_string) else {
      return Box::pin(ready(Err(Error::from_context(
        types::Error::Unauthorized,
        Unauthorized,
      ))));
    };

    Box::pin(async move {
      let claims = LoginClaims::decode(&app, &token)?;
      match app.store().find_user(claims.sub).await? {
        Some(user) => Ok(SessionUser(user)),
        // Users are never deleted, so this only happens with a token
        // from another deployment sharing the same secret.
        None => Err(
          Error::from_context(types::Error::Unauthorized, Unauthorized)
            .attach_printable("token subject no longer exists"),
        ),
      }
    })
  }
}

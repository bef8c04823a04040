use chrono::Utc;
use error_stack::{Result as StackResult, ResultExt};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
  schema::User,
  types::{self, id::UserId},
  App, Error, Result,
};

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;
const JWT_LOGIN_ISSUER: &str = "jotter.api.login";

/// Claims of the access token handed out on registration and login.
///
/// It only identifies the user, everything else about them is
/// looked up again on every request.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginClaims {
  pub iat: i64,
  pub exp: i64,
  pub iss: String,
  pub sub: UserId,
}

#[derive(Debug, Error)]
#[error("Failed to decode as JWT")]
pub struct DecodeJwtError;

#[derive(Debug, Error)]
#[error("Failed to encode as JWT")]
pub struct EncodeJwtError;

impl LoginClaims {
  #[must_use]
  pub fn generate(app: &App, user: &User) -> Self {
    let now = Utc::now();
    Self {
      iat: now.timestamp(),
      exp: (now + app.config.auth.token_ttl()).timestamp(),
      iss: JWT_LOGIN_ISSUER.to_string(),
      sub: user.id,
    }
  }

  #[tracing::instrument(skip_all, name = "jwt.decode")]
  pub fn decode(app: &App, token: &str) -> Result<Self> {
    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_issuer(&[JWT_LOGIN_ISSUER]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);

    let key = DecodingKey::from_secret(app.config.auth.jwt_secret.as_str().as_bytes());
    match jsonwebtoken::decode::<Self>(token.trim(), &key, &validation) {
      Ok(data) => Ok(data.claims),
      Err(error) => {
        let error_type = match error.kind() {
          ErrorKind::ExpiredSignature => types::Error::ExpiredToken,
          _ => types::Error::Unauthorized,
        };
        Err(Error::from_context(error_type, DecodeJwtError).attach_printable(error))
      }
    }
  }

  #[tracing::instrument(skip_all, name = "jwt.encode")]
  pub fn encode(&self, app: &App) -> StackResult<String, EncodeJwtError> {
    let key = EncodingKey::from_secret(app.config.auth.jwt_secret.as_str().as_bytes());
    jsonwebtoken::encode(&Header::new(JWT_ALGORITHM), self, &key)
      .change_context(EncodeJwtError)
      .attach_printable("could not encode login jwt claims")
  }
}

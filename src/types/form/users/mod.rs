use serde::Serialize;

use crate::{schema::User, util::Sensitive};

pub mod login;
pub mod register;

/// Returned by both registration and login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub user: User,
  pub access_token: Sensitive<String>,
}

#[derive(Debug, Serialize)]
pub struct Profile {
  pub user: User,
}

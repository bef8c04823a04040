use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use error_stack::{Report, Result, ResultExt};
use once_cell::sync::Lazy;
use thiserror::Error;

static CONTEXT: Lazy<Argon2<'static>> = Lazy::new(|| {
  Argon2::new(
    argon2::Algorithm::Argon2id,
    argon2::Version::V0x13,
    argon2::Params::DEFAULT,
  )
});

#[derive(Debug, Error)]
#[error("Failed to generate password hash")]
pub struct HashPasswordError;

/// Hashes the password with a random salt and returns it in PHC
/// string format. This is CPU heavy, run it in a blocking task.
pub fn hash(password: impl AsRef<[u8]>) -> Result<String, HashPasswordError> {
  let salt = SaltString::generate(&mut OsRng);
  let password_hash = CONTEXT
    .hash_password(password.as_ref(), &salt)
    .map_err(|e| Report::new(HashPasswordError).attach_printable(e.to_string()))?;

  Ok(password_hash.to_string())
}

#[derive(Debug, Error)]
#[error("Failed to verify password")]
pub struct VerifyPasswordError;

pub fn verify(password: impl AsRef<[u8]>, hash: &str) -> Result<bool, VerifyPasswordError> {
  let hash = PasswordHash::new(hash)
    .map_err(|e| Report::new(VerifyPasswordError).attach_printable(e.to_string()))
    .attach_printable("could not parse password hash")?;

  match CONTEXT.verify_password(password.as_ref(), &hash) {
    Ok(..) => Ok(true),
    Err(argon2::password_hash::Error::Password) => Ok(false),
    Err(error) => Err(Report::new(VerifyPasswordError).attach_printable(error.to_string())),
  }
}

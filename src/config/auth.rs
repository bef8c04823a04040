use serde::Deserialize;
use std::num::NonZeroU64;
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Secret used to sign and verify access tokens.
    ///
    /// **Environment variables**:
    /// - `JOTTER_AUTH_JWT_SECRET` or `ACCESS_TOKEN_SECRET`
    pub jwt_secret: Sensitive<String>,
    /// How long an access token stays valid after it is issued.
    ///
    /// **Environment variables**:
    /// - `JOTTER_AUTH_TOKEN_TTL_SECS`
    #[serde(default = "Auth::default_token_ttl_secs")]
    pub token_ttl_secs: NonZeroU64,
}

impl Auth {
    const DEFAULT_TOKEN_TTL_SECS: u64 = 30 * 60;

    const JWT_SECRET_MIN: usize = 12;
    const JWT_SECRET_MAX: usize = 1024;

    const fn default_token_ttl_secs() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TOKEN_TTL_SECS) {
            Some(n) => n,
            None => panic!("DEFAULT_TOKEN_TTL_SECS is accidentally set to 0"),
        }
    }

    #[must_use]
    pub fn token_ttl(&self) -> chrono::Duration {
        // chrono panics past this many seconds
        const MAX_SECS: i64 = i64::MAX / 1_000;
        let secs = i64::try_from(self.token_ttl_secs.get()).unwrap_or(MAX_SECS);
        chrono::Duration::seconds(secs.min(MAX_SECS))
    }
}

impl Validate for Auth {
    fn validate(&self) -> Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        let len = self.jwt_secret.as_str().len();
        if !(Self::JWT_SECRET_MIN..=Self::JWT_SECRET_MAX).contains(&len) {
            fields.insert("jwt_secret", ValidateError::message("Invalid JWT secret key"));
        }
        fields.build().into_result()
    }
}

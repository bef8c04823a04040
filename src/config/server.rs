use error_stack::{Report, Result, ResultExt};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use validator::{Validate, ValidateError};

use super::ParseError;
use crate::util::{figment::FigmentErrorAttachable, validator::IntoValidatorReport};

#[derive(Debug, Deserialize)]
pub struct Server {
    /// **Environment variables**:
    /// - `JOTTER_IP`
    #[serde(default = "Server::default_ip")]
    pub ip: IpAddr,
    /// **Environment variables**:
    /// - `JOTTER_PORT`
    #[serde(default = "Server::default_port")]
    pub port: u16,
    /// Amount of HTTP workers. Defaults to the number of
    /// available CPUs.
    ///
    /// **Environment variables**:
    /// - `JOTTER_WORKERS`
    #[serde(default = "Server::default_workers")]
    pub workers: usize,
    /// Notes are kept in memory and lost on shutdown if
    /// this is not set.
    pub db: Option<super::Database>,
    pub auth: super::Auth,
}

impl Server {
    pub fn load() -> Result<Self, ParseError> {
        dotenvy::dotenv().ok();
        Self::from_figment(&Self::figment())
    }

    pub(crate) fn from_figment(figment: &figment::Figment) -> Result<Self, ParseError> {
        let config = figment
            .extract::<Self>()
            .map_err(|e| Report::new(ParseError).attach_figment_error(e))?;

        config
            .validate()
            .into_validator_report()
            .change_context(ParseError)?;

        Ok(config)
    }
}

impl Validate for Server {
    fn validate(&self) -> std::result::Result<(), ValidateError> {
        let mut fields = ValidateError::field_builder();
        if let Err(error) = self.auth.validate() {
            fields.insert("auth", error);
        }
        if let Err(error) = self.db.validate() {
            fields.insert("db", error);
        }
        if self.workers == 0 {
            fields.insert("workers", ValidateError::message("Must have at least one worker"));
        }
        fields.build().into_result()
    }
}

impl Server {
    const DEFAULT_CONFIG_FILE: &'static str = "jotter.toml";
    const DEFAULT_PORT: u16 = 8000;

    fn default_ip() -> IpAddr {
        IpAddr::V4(Ipv4Addr::LOCALHOST)
    }

    const fn default_port() -> u16 {
        Self::DEFAULT_PORT
    }

    fn default_workers() -> usize {
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }

    /// Creates a default [`Figment`] object to load server
    /// configuration. This function is there for implementing
    /// [`Server::load`] and testing.
    ///
    /// [`Figment`]: figment::Figment
    pub(crate) fn figment() -> figment::Figment {
        use figment::{
            providers::{Env, Format, Toml},
            Figment,
        };

        Figment::new()
            .merge(Toml::file(Self::DEFAULT_CONFIG_FILE))
            // One big con about figment (env provider to be specific) especially
            // these fields with underscore in it.
            .merge(Env::prefixed("JOTTER_").map(|v| match v.as_str() {
                "AUTH_JWT_SECRET" => "auth.jwt_secret".into(),
                "AUTH_TOKEN_TTL_SECS" => "auth.token_ttl_secs".into(),

                "DB_MIN_IDLE" => "db.min_idle".into(),
                "DB_POOL_SIZE" => "db.pool_size".into(),
                "DB_ENFORCE_TLS" => "db.enforce_tls".into(),
                "DB_TIMEOUT_SECS" => "db.timeout_secs".into(),

                _ => v.as_str().replace('_', ".").into(),
            }))
            // Environment variable aliases
            .merge(
                Env::raw()
                    .only(&["DATABASE_URL", "ACCESS_TOKEN_SECRET"])
                    .map(|v| match v.as_str() {
                        "DATABASE_URL" => "db.url".into(),
                        "ACCESS_TOKEN_SECRET" => "auth.jwt_secret".into(),
                        _ => v.into(),
                    }),
            )
    }
}

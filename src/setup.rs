use std::{
    env,
    fmt::{Debug, Display},
    str::FromStr,
};
use tracing_subscriber::EnvFilter;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(thiserror::Error)]
pub enum VarError {
    #[cfg(feature = "dotenv")]
    #[error("The dotenv file could not be found")]
    DotenvFileNotFound,

    #[error("The environment variable \"{0}\" was not provided")]
    NotProvided(&'static str),
    #[error("The environment variable \"{0}\" could not be parsed")]
    Invalid(&'static str),
}

impl Debug for VarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self, f)
    }
}

impl VarError {
    fn from_std(err: env::VarError, key: &'static str) -> Self {
        match err {
            env::VarError::NotPresent => Self::NotProvided(key),
            env::VarError::NotUnicode(_) => Self::Invalid(key),
        }
    }
}

pub fn env_param<T: FromStr>(key: &'static str) -> Result<T, VarError> {
    match env::var(key) {
        Ok(v) => T::from_str(&v).map_err(|_| VarError::Invalid(key)),
        Err(err) => Err(VarError::from_std(err, key)),
    }
}

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Fails if a global subscriber was already set.
pub fn init_tracing() -> Result<(), BoxedError> {
    #[cfg(feature = "json-log")]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()?;

    #[cfg(not(feature = "json-log"))]
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()?;

    Ok(())
}

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bcrypt_cost: u32,
    #[cfg(feature = "postgres")]
    pub database_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            #[cfg(feature = "postgres")]
            database_url: String::new(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, VarError> {
        #[cfg(feature = "dotenv")]
        dotenvy::dotenv().map_err(|_| VarError::DotenvFileNotFound)?;

        let bcrypt_cost = match env_param("RESTHUB_BCRYPT_COST") {
            Ok(v) => v,
            Err(VarError::NotProvided(_)) => bcrypt::DEFAULT_COST,
            Err(e) => return Err(e),
        };

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(VarError::Invalid("RESTHUB_BCRYPT_COST"));
        }

        Ok(Self {
            bcrypt_cost,
            #[cfg(feature = "postgres")]
            database_url: env_param("DATABASE_URL")?,
        })
    }
}

use thiserror::Error;

use crate::construct::Handle;

#[derive(Error, Debug)]
pub enum AtomSpaceError {
    #[error("Handle not found")]
    NotFound { handle: Handle },
    #[error("{0}")]
    BadRequest(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, AtomSpaceError>;

impl AtomSpaceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

// Helper conversions
impl From<config::ConfigError> for AtomSpaceError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for AtomSpaceError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl<T> From<std::sync::PoisonError<T>> for AtomSpaceError {
    fn from(e: std::sync::PoisonError<T>) -> Self { Self::Lock(e.to_string()) }
}

//! Error taxonomy shared by the browser and the boot pipeline.

use std::collections::TryReserveError;
use thiserror::Error;

use crate::core::fs::FsError;

/// Erros do firmware
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument")]
    InvalidArgument,

    #[error("out of memory")]
    OutOfMemory,

    /// A record or file that is allowed to be missing was not found.
    #[error("not found")]
    NotFound,

    /// The directory to browse has no parent or no longer exists.
    #[error("no usable path")]
    NoUsablePath,

    #[error("filesystem error: {0}")]
    Fs(FsError),
}

impl From<FsError> for Error {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NoFile => Error::NotFound,
            FsError::NoPath => Error::NoUsablePath,
            other => Error::Fs(other),
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

/// Tipo de resultado do firmware
pub type Result<T> = std::result::Result<T, Error>;

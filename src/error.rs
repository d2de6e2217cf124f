//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::classify::ClassificationError;
use crate::config::SettingsError;
use crate::metadata::{ExtractError, MetadataError};
use crate::record::RecordIoError;
use crate::sql::LookupGapError;

/// Result type for pipeline stages.
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure that aborts a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    LookupGap(#[from] LookupGapError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    RecordIo(#[from] RecordIoError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// No object name could be derived from the CSV file name.
    #[error("cannot derive an object name from {0}; pass it explicitly")]
    ObjectName(PathBuf),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ExtractError> for Error {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Metadata(e) => Self::Metadata(e),
            ExtractError::Classification(e) => Self::Classification(e),
        }
    }
}

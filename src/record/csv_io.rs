//! The intermediate CSV shared by the extraction and generation stages.
//!
//! The header is fixed and always written, even for an object with no
//! surviving fields:
//!
//! ```text
//! source_field,source_datatype,destination_datatype,salesforce_datatype
//! Amount__c,CURRENCY,FLOAT,"Currency(18, 2)"
//! ```

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::TypedFieldRecord;

/// Column order of the intermediate CSV.
pub const CSV_HEADER: [&str; 4] = ["source_field", "source_datatype", "destination_datatype", "salesforce_datatype"];

/// Errors reading or writing the intermediate CSV.
#[derive(Error, Debug)]
pub enum RecordIoError {
    /// The file could not be opened or created.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed CSV, or a cell that is not a canonical token.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row does not match the fixed layout.
    #[error("unexpected CSV header {found:?}, expected {expected:?}")]
    Header { expected: Vec<String>, found: Vec<String> },

    #[error("failed to flush CSV output: {0}")]
    Flush(#[source] io::Error),
}

/// Write records, header first.
pub fn write_records<W: Write>(writer: W, records: &[TypedFieldRecord]) -> Result<(), RecordIoError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(RecordIoError::Flush)?;
    Ok(())
}

/// Read records, rejecting files whose header differs from [`CSV_HEADER`].
pub fn read_records<R: Read>(reader: R) -> Result<Vec<TypedFieldRecord>, RecordIoError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let found: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if found != CSV_HEADER {
        return Err(RecordIoError::Header {
            expected: CSV_HEADER.iter().map(|h| h.to_string()).collect(),
            found,
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<TypedFieldRecord>, csv::Error>>()
        .map_err(Into::into)
}

/// Write records to a file, replacing any existing content.
pub fn write_csv_file(path: impl AsRef<Path>, records: &[TypedFieldRecord]) -> Result<(), RecordIoError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| RecordIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    write_records(file, records)?;
    info!(path = %path.display(), records = records.len(), "wrote CSV");
    Ok(())
}

/// Read records from a file.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<Vec<TypedFieldRecord>, RecordIoError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| RecordIoError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_records(file)?;
    info!(path = %path.display(), records = records.len(), "read CSV");
    Ok(records)
}

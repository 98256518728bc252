use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of the ingest pipeline. None of them are retried.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read JSON file {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("out of memory reading {size} bytes")]
    Allocation {
        size: u64,
        #[source]
        source: TryReserveError,
    },

    #[error("JSON is empty or malformed: missing \"nome\" or \"imagem_url\"")]
    InvalidData,

    #[error("could not open database: {0}")]
    StorageOpen(rusqlite::Error),

    #[error("could not prepare INSERT: {0}")]
    InsertPrepare(rusqlite::Error),

    #[error("insert failed: {0}")]
    InsertExec(rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;

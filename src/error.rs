use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a roster run. None of these are recovered from:
/// lines already printed stay printed and the run ends.
#[derive(Error, Debug)]
pub enum RosterError {
    /// The input file is missing or cannot be opened for reading.
    #[error("cannot open `{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed csv or invalid UTF-8 in the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has no value for one of the printed columns.
    #[error("line {line}: record has no `{field}' field")]
    MissingField { field: &'static str, line: u64 },

    /// Writing to the output failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RosterError>;

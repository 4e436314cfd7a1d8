//! error type shared by the loaders, writers and the evaluator

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// the file is too short to even hold its row-count header
    #[error("{} is truncated ({len} bytes)", path.display())]
    Truncated { path: PathBuf, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dataset contains no points")]
    EmptyDataset,

    /// the first result row handed to the writer has the wrong number of ids
    #[error("expected result rows of {expected} ids, first row has {found}")]
    ResultWidth { expected: usize, found: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Error {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

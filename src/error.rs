//! Error types shared across the kinemetry binaries.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{path}: missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: String },

    #[error("{path}: file contains no data rows")]
    EmptyTable { path: PathBuf },

    #[error("participant {id:04}: expected exactly one session file, found {found}")]
    ParticipantFile { id: u32, found: usize },

    #[error("unknown timezone `{0}`")]
    Timezone(String),

    #[error("logistic fit did not converge after {iterations} iterations")]
    NoConvergence { iterations: usize },

    #[error("invalid model input: {0}")]
    ModelInput(String),

    #[error("figure rendering failed: {0}")]
    Render(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an io error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

use std::path::PathBuf;

use skillets_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("path does not exist: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("no template root found among: {}", display_paths(candidates))]
    RootNotFound { candidates: Vec<PathBuf> },

    #[error("malformed manifest {}: {reason}", path.display())]
    Structural { path: PathBuf, reason: String },

    #[error("invalid snippet #{index} in {}: {reason}", manifest.display())]
    InvalidDeclaration {
        manifest: PathBuf,
        index: usize,
        reason: String,
    },

    #[error("failed to read snippet file {}: {source}", path.display())]
    ContentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{message}")]
    Message { message: String },
}

impl Error {
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn structural(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Structural {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;

skillets_common::impl_context!();

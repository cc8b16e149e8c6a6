use std::path::PathBuf;

use skillets_common::FromMessage;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a git client is required but `git` was not found in PATH")]
    GitNotFound,

    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    #[error("repository has not been cloned yet")]
    NotCloned,

    #[error("refusing to use {} as clone target: {reason}", path.display())]
    UnsafeTarget { path: PathBuf, reason: String },

    #[error("GitHub API call failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Build(#[from] skillets_builder::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

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
}

impl FromMessage for Error {
    fn from_message(message: String) -> Self {
        Self::Message { message }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

skillets_common::impl_context!();

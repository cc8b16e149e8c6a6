//! Recoverable build problems.
//!
//! Invalid snippet declarations, unreadable snippet files and malformed
//! manifests never abort a build. Each one is recorded here so callers can
//! see exactly which configuration was dropped.

use std::{fmt, path::PathBuf};

use serde::Serialize;

use crate::error::Error;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A whole snippet directory was skipped.
    Error,
    /// A single snippet was skipped.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    StructuralError,
    InvalidDeclaration,
    ContentReadError,
    UnreadableDirectory,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::StructuralError | Self::UnreadableDirectory => Severity::Error,
            Self::InvalidDeclaration | Self::ContentReadError => Severity::Warning,
        }
    }
}

/// A single dropped item and why.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Manifest, snippet file or directory the problem was found at.
    pub path: PathBuf,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Convert a recoverable build error into a diagnostic.
    ///
    /// Returns `None` for fatal errors, which must be propagated instead.
    pub fn from_error(err: &Error) -> Option<Self> {
        let (kind, path) = match err {
            Error::Structural { path, .. } => (DiagnosticKind::StructuralError, path),
            Error::InvalidDeclaration { manifest, .. } => {
                (DiagnosticKind::InvalidDeclaration, manifest)
            },
            Error::ContentRead { path, .. } => (DiagnosticKind::ContentReadError, path),
            _ => return None,
        };
        Some(Self::new(kind, path.clone(), err.to_string()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

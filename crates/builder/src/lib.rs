//! Skillet discovery and assembly.
//!
//! A skillet tree is a directory whose snippet directories each carry a
//! `.meta-cnc.yaml` manifest. Snippet directories sit either directly under
//! the template root (flat layout) or under a platform directory such as
//! `panos/` or `panorama/`. Building a tree yields a [`SkilletCollection`]
//! with one [`Skillet`] per declared manifest `type`.

pub mod builder;
pub mod classify;
pub mod collection;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod root;
pub mod types;
pub mod validate;

pub use {
    builder::{BuildReport, PathBuilder},
    collection::{Skillet, SkilletCollection, Snippet, SnippetStack},
    diagnostics::{Diagnostic, DiagnosticKind, Severity},
    error::{Error, Result},
    types::{DirectoryClass, ManifestMetadata, PlatformType, SnippetDeclaration},
};

/// File name of the per-directory manifest.
pub const MANIFEST_FILE: &str = ".meta-cnc.yaml";

/// Conventional subdirectory preferred over the tree root as template root.
pub const TEMPLATES_DIR: &str = "templates";

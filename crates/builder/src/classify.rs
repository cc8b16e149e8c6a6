//! Directory classification.
//!
//! Two layouts are supported at once: platform directories
//! (`root/panos/<snippet-dir>`) and snippet directories sitting directly under
//! the template root. The second form always collapses to one entry keyed by
//! [`DirectoryClass::Flat`] that points at the template root itself.

use std::{
    collections::BTreeMap,
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    MANIFEST_FILE,
    types::{DirectoryClass, PlatformType},
};

/// A directory is a snippet directory iff its manifest sits directly inside it.
pub fn is_snippet_dir(dir: &Path) -> bool {
    dir.join(MANIFEST_FILE).is_file()
}

/// Immediate child directories of `dir`, sorted by file name.
pub fn child_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Snippet directories directly under `dir`, sorted by file name.
pub fn snippet_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    Ok(child_dirs(dir)?
        .into_iter()
        .filter(|d| is_snippet_dir(d))
        .collect())
}

/// Map each type directory under `template_root` to the path to scan.
///
/// Platform-named children map to themselves. Any other child that is a
/// snippet directory registers the whole template root under
/// [`DirectoryClass::Flat`], replacing the previous flat entry.
pub fn type_directories(template_root: &Path) -> io::Result<BTreeMap<DirectoryClass, PathBuf>> {
    let mut types = BTreeMap::new();

    for dir in child_dirs(template_root)? {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        if let Some(platform) = PlatformType::from_dir_name(name) {
            debug!(dir = %dir.display(), %platform, "type directory");
            types.insert(DirectoryClass::Typed(platform), dir);
        } else if is_snippet_dir(&dir) {
            debug!(dir = %dir.display(), "flat snippet directory");
            types.insert(DirectoryClass::Flat, template_root.to_path_buf());
        }
    }

    Ok(types)
}

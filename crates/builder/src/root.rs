use std::path::{Path, PathBuf};

use crate::TEMPLATES_DIR;

/// Candidate template roots for a tree, in priority order.
///
/// `<base>/templates` wins over `<base>` when both exist.
pub fn template_candidates(base: &Path) -> Vec<PathBuf> {
    vec![base.join(TEMPLATES_DIR), base.to_path_buf()]
}

/// Return the first candidate that exists and is a directory.
pub fn first_real_dir<P: AsRef<Path>>(candidates: &[P]) -> Option<&Path> {
    for candidate in candidates {
        let path: &Path = candidate.as_ref();
        if path.is_dir() {
            return Some(path);
        }
    }
    None
}

use std::path::{Path, PathBuf};

use crate::types::SnippetDeclaration;

/// A declaration whose required fields are present and whose file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDeclaration {
    pub name: String,
    pub file: PathBuf,
    pub xpath: String,
}

/// Check a declaration against the directory it was declared in.
///
/// Both `file` and `xpath` must be present and non-empty, and `file` must
/// resolve to a regular file relative to `dir`. The xpath is otherwise
/// opaque, but a blank one is rejected rather than accepted on key presence
/// alone, since it could never address a configuration node.
pub fn check_declaration(
    decl: &SnippetDeclaration,
    dir: &Path,
) -> Result<ValidDeclaration, String> {
    let file = required(decl.file.as_deref(), "file")?;
    let xpath = required(decl.xpath.as_deref(), "xpath")?;

    let path = dir.join(file);
    if !path.is_file() {
        return Err(format!("referenced file {} does not exist", path.display()));
    }

    Ok(ValidDeclaration {
        name: decl.name.clone().unwrap_or_default(),
        file: path,
        xpath: xpath.to_string(),
    })
}

pub fn is_valid_declaration(decl: &SnippetDeclaration, dir: &Path) -> bool {
    check_declaration(decl, dir).is_ok()
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(format!("missing `{field}`")),
    }
}

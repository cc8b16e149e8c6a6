use std::path::Path;

use serde_yaml::Value;

use crate::{
    error::{Error, Result},
    types::{ManifestMetadata, SnippetDeclaration},
};

/// A loaded manifest: shared metadata plus its raw snippet entries.
#[derive(Debug, Clone)]
pub struct Manifest {
    pub metadata: ManifestMetadata,
    /// Entries of the `snippets` list, in declaration order.
    ///
    /// Entries that are not mappings are kept as `Err` so the caller can
    /// report them without losing their position.
    pub declarations: Vec<std::result::Result<SnippetDeclaration, String>>,
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::structural(path, format!("failed to read: {e}")))?;
    parse_manifest(&raw, path)
}

/// Parse manifest text. `path` is recorded in the metadata and in errors.
pub fn parse_manifest(raw: &str, path: &Path) -> Result<Manifest> {
    let document: Value = serde_yaml::from_str(raw)
        .map_err(|e| Error::structural(path, format!("invalid YAML: {e}")))?;

    if !document.is_mapping() {
        return Err(Error::structural(path, "document is not a mapping"));
    }

    let snippets = document
        .get("snippets")
        .ok_or_else(|| Error::structural(path, "missing `snippets` field"))?;

    let declarations = match snippets {
        Value::Sequence(entries) => entries.iter().map(parse_declaration).collect(),
        Value::Null => Vec::new(),
        _ => return Err(Error::structural(path, "`snippets` is not a list")),
    };

    let metadata = ManifestMetadata {
        path: path.to_path_buf(),
        skillet_type: string_field(&document, "type"),
        name: string_field(&document, "name"),
        label: string_field(&document, "label"),
        description: string_field(&document, "description"),
        document,
    };

    Ok(Manifest {
        metadata,
        declarations,
    })
}

/// Scalar fields are stringified; a non-scalar field reads as absent.
fn parse_declaration(entry: &Value) -> std::result::Result<SnippetDeclaration, String> {
    if !entry.is_mapping() {
        return Err("entry is not a mapping".into());
    }
    Ok(SnippetDeclaration {
        name: string_field(entry, "name"),
        file: string_field(entry, "file"),
        xpath: string_field(entry, "xpath"),
    })
}

/// Scalar field rendered as a string; numbers and booleans are stringified.
fn string_field(document: &Value, key: &str) -> Option<String> {
    match document.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

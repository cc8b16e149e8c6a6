use std::sync::Arc;

use tracing::warn;

use crate::{
    collection::Snippet,
    diagnostics::Diagnostic,
    error::Error,
    manifest::Manifest,
    types::ManifestMetadata,
    validate::{ValidDeclaration, check_declaration},
};

/// Snippets loaded from one manifest, plus everything that was dropped.
#[derive(Debug)]
pub struct Extraction {
    pub metadata: Arc<ManifestMetadata>,
    pub snippets: Vec<Snippet>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Validate each declaration of `manifest` and load the ones that pass.
///
/// Invalid declarations and unreadable files are skipped individually; the
/// remaining declarations are still processed.
pub fn extract_snippets(manifest: Manifest) -> Extraction {
    let metadata = Arc::new(manifest.metadata);
    let dir = metadata.dir();
    let mut snippets = Vec::new();
    let mut diagnostics = Vec::new();

    for (index, declaration) in manifest.declarations.iter().enumerate() {
        let result = declaration
            .clone()
            .and_then(|decl| check_declaration(&decl, &dir))
            .map_err(|reason| Error::InvalidDeclaration {
                manifest: metadata.path.clone(),
                index,
                reason,
            })
            .and_then(|valid| load_snippet(valid, &metadata));

        match result {
            Ok(snippet) => snippets.push(snippet),
            Err(err) => {
                warn!(manifest = %metadata.path.display(), index, error = %err, "skipping snippet");
                diagnostics.extend(Diagnostic::from_error(&err));
            },
        }
    }

    Extraction {
        metadata,
        snippets,
        diagnostics,
    }
}

/// Read a validated declaration's file into a [`Snippet`].
pub fn load_snippet(
    valid: ValidDeclaration,
    metadata: &Arc<ManifestMetadata>,
) -> Result<Snippet, Error> {
    let content = std::fs::read_to_string(&valid.file).map_err(|source| Error::ContentRead {
        path: valid.file.clone(),
        source,
    })?;
    Ok(Snippet::new(
        valid.name,
        valid.xpath,
        content,
        Arc::clone(metadata),
    ))
}

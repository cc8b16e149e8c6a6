use std::path::{Path, PathBuf};

use {
    serde::Serialize,
    tracing::{debug, info, warn},
};

use crate::{
    MANIFEST_FILE,
    classify::{snippet_dirs, type_directories},
    collection::{SkilletCollection, SnippetStack},
    diagnostics::{Diagnostic, DiagnosticKind, Severity},
    error::{Context, Error, Result},
    extract::extract_snippets,
    manifest::load_manifest,
    root::{first_real_dir, template_candidates},
    types::DirectoryClass,
};

/// Output of a build: the assembled collection and every dropped item.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub collection: SkilletCollection,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Builds skillet collections from a local directory tree.
///
/// Every call to [`PathBuilder::build`] re-reads the tree; nothing is cached
/// between builds and nothing on disk is modified.
#[derive(Debug, Clone)]
pub struct PathBuilder {
    path: PathBuf,
}

impl PathBuilder {
    /// Create a builder for `path`, which must exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::PathNotFound { path });
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pick the template root: `<path>/templates` if present, else `<path>`.
    pub fn template_root(&self) -> Result<PathBuf> {
        let candidates = template_candidates(&self.path);
        match first_real_dir(&candidates) {
            Some(root) => Ok(root.to_path_buf()),
            None => Err(Error::RootNotFound { candidates }),
        }
    }

    /// Walk the tree and assemble a collection named `name`.
    ///
    /// Fails only when no template root exists or the root cannot be listed.
    /// Malformed manifests, invalid declarations and unreadable snippet
    /// files are reported in [`BuildReport::diagnostics`].
    pub fn build(&self, name: &str) -> Result<BuildReport> {
        let template_root = self.template_root()?;
        debug!(root = %template_root.display(), "resolved template root");

        let types = type_directories(&template_root).with_context(|| {
            format!(
                "failed to list template root {}",
                template_root.display()
            )
        })?;

        let mut collection = SkilletCollection::new(name);
        let mut diagnostics = Vec::new();

        for (class, dir) in &types {
            for stack in stacks_in_dir(*class, dir, &mut diagnostics) {
                let skillet_type = stack
                    .skillet_type()
                    .unwrap_or_else(|| class.type_name())
                    .to_string();
                collection.skillet_mut(&skillet_type).add_stack(stack);
            }
        }

        info!(
            name,
            root = %template_root.display(),
            skillets = collection.len(),
            stacks = collection.stack_count(),
            snippets = collection.snippet_count(),
            dropped = diagnostics.len(),
            "built skillet collection"
        );

        Ok(BuildReport {
            collection,
            diagnostics,
        })
    }
}

/// Build one [`SnippetStack`] per snippet directory under `dir`.
///
/// Directories whose manifest yields no snippets produce no stack.
fn stacks_in_dir(
    class: DirectoryClass,
    dir: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<SnippetStack> {
    let snippet_dirs = match snippet_dirs(dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "failed to list type directory");
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnreadableDirectory,
                dir,
                format!("failed to list {}: {e}", dir.display()),
            ));
            return Vec::new();
        },
    };

    let mut stacks = Vec::new();
    for snippet_dir in snippet_dirs {
        let manifest_path = snippet_dir.join(MANIFEST_FILE);
        let manifest = match load_manifest(&manifest_path) {
            Ok(m) => m,
            Err(err) => {
                warn!(%class, manifest = %manifest_path.display(), error = %err, "skipping snippet directory");
                diagnostics.extend(Diagnostic::from_error(&err));
                continue;
            },
        };

        let extraction = extract_snippets(manifest);
        diagnostics.extend(extraction.diagnostics);

        if extraction.snippets.is_empty() {
            debug!(dir = %snippet_dir.display(), "no usable snippets, dropping directory");
            continue;
        }

        let name = snippet_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        stacks.push(SnippetStack {
            name,
            path: snippet_dir,
            metadata: extraction.metadata,
            snippets: extraction.snippets,
        });
    }
    stacks
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, std::fs};

    fn snippet_dir(dir: &Path, skillet_type: Option<&str>, files: &[(&str, &str)]) {
        fs::create_dir_all(dir).unwrap();
        let mut manifest = String::new();
        if let Some(t) = skillet_type {
            manifest.push_str(&format!("type: {t}\n"));
        }
        manifest.push_str("snippets:\n");
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
            manifest.push_str(&format!(
                "  - name: {file}\n    file: {file}\n    xpath: /config/{file}\n"
            ));
        }
        fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    #[test]
    fn missing_path_is_rejected() {
        let err = PathBuilder::new("/nonexistent/skillets").unwrap_err();
        assert!(matches!(err, Error::PathNotFound { .. }));
    }

    #[test]
    fn file_path_has_no_template_root() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("README.md");
        fs::write(&file, "hello").unwrap();

        let builder = PathBuilder::new(&file).unwrap();
        let err = builder.build("x").unwrap_err();
        let Error::RootNotFound { candidates } = &err else {
            panic!("expected RootNotFound, got {err}");
        };
        assert_eq!(candidates, &vec![file.join("templates"), file.clone()]);
        assert!(err.to_string().starts_with("no template root found among:"));
    }

    #[test]
    fn manifest_without_type_uses_directory_class() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        snippet_dir(&root.join("panorama/untyped"), None, &[("a.xml", "<a/>")]);
        snippet_dir(&root.join("loose"), None, &[("b.xml", "<b/>")]);

        let report = PathBuilder::new(root).unwrap().build("t").unwrap();
        let types: Vec<_> = report.collection.types().collect();
        assert_eq!(types, vec!["panorama", "panos"]);
    }

    #[test]
    fn empty_stack_is_silently_dropped() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        snippet_dir(&root.join("empty"), Some("panos"), &[]);

        let report = PathBuilder::new(root).unwrap().build("t").unwrap();
        assert!(report.collection.is_empty());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn report_counts_by_severity() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        snippet_dir(&root.join("ok"), Some("panos"), &[("a.xml", "<a/>")]);
        fs::create_dir_all(root.join("broken")).unwrap();
        fs::write(root.join("broken").join(MANIFEST_FILE), "type: panos\n").unwrap();
        fs::write(
            root.join("ok").join(MANIFEST_FILE),
            "type: panos\nsnippets:\n  - {name: a, file: a.xml, xpath: /a}\n  - {name: b, file: nope.xml, xpath: /b}\n",
        )
        .unwrap();

        let report = PathBuilder::new(root).unwrap().build("t").unwrap();
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Error), 1);
        assert_eq!(report.count(Severity::Warning), 1);
        assert_eq!(report.collection.snippet_count(), 1);
    }

    #[test]
    fn build_does_not_touch_the_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        snippet_dir(&root.join("panos/a"), Some("panos"), &[("a.xml", "<a/>")]);

        let before = fs::read_to_string(root.join("panos/a").join(MANIFEST_FILE)).unwrap();
        PathBuilder::new(root).unwrap().build("t").unwrap();
        let after = fs::read_to_string(root.join("panos/a").join(MANIFEST_FILE)).unwrap();
        assert_eq!(before, after);
        assert!(root.join("panos/a/a.xml").is_file());
    }
}

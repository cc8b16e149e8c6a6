use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use serde::Serialize;

use crate::types::ManifestMetadata;

/// A loaded configuration fragment.
#[derive(Debug, Clone, Serialize)]
pub struct Snippet {
    /// Display name from the declaration; empty when none was declared.
    pub name: String,
    /// Where the content applies in the target configuration.
    pub xpath: String,
    pub content: String,
    /// Metadata of the manifest that declared this snippet.
    #[serde(skip)]
    pub metadata: Arc<ManifestMetadata>,
}

impl Snippet {
    pub fn new(
        name: impl Into<String>,
        xpath: impl Into<String>,
        content: impl Into<String>,
        metadata: Arc<ManifestMetadata>,
    ) -> Self {
        Self {
            name: name.into(),
            xpath: xpath.into(),
            content: content.into(),
            metadata,
        }
    }
}

/// The snippets of one snippet directory, with that directory's manifest.
#[derive(Debug, Clone, Serialize)]
pub struct SnippetStack {
    /// Snippet directory name.
    pub name: String,
    pub path: PathBuf,
    pub metadata: Arc<ManifestMetadata>,
    pub snippets: Vec<Snippet>,
}

impl SnippetStack {
    pub fn skillet_type(&self) -> Option<&str> {
        self.metadata.skillet_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Every snippet stack sharing one declared type.
#[derive(Debug, Clone, Serialize)]
pub struct Skillet {
    pub name: String,
    #[serde(rename = "type")]
    pub skillet_type: String,
    pub stacks: Vec<SnippetStack>,
}

impl Skillet {
    pub fn new(skillet_type: impl Into<String>) -> Self {
        let skillet_type = skillet_type.into();
        Self {
            name: skillet_type.clone(),
            skillet_type,
            stacks: Vec::new(),
        }
    }

    pub fn add_stack(&mut self, stack: SnippetStack) {
        self.stacks.push(stack);
    }

    pub fn snippets(&self) -> impl Iterator<Item = &Snippet> {
        self.stacks.iter().flat_map(|s| s.snippets.iter())
    }
}

/// Result of a build: one [`Skillet`] per declared type.
#[derive(Debug, Clone, Serialize)]
pub struct SkilletCollection {
    pub name: String,
    pub skillets: BTreeMap<String, Skillet>,
}

impl SkilletCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skillets: BTreeMap::new(),
        }
    }

    /// Skillet for `skillet_type`, created on first use.
    pub fn skillet_mut(&mut self, skillet_type: &str) -> &mut Skillet {
        self.skillets
            .entry(skillet_type.to_string())
            .or_insert_with(|| Skillet::new(skillet_type))
    }

    pub fn skillet(&self, skillet_type: &str) -> Option<&Skillet> {
        self.skillets.get(skillet_type)
    }

    /// Declared types, sorted.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.skillets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skillets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skillets.is_empty()
    }

    pub fn stack_count(&self) -> usize {
        self.skillets.values().map(|s| s.stacks.len()).sum()
    }

    pub fn snippet_count(&self) -> usize {
        self.skillets.values().map(|s| s.snippets().count()).sum()
    }
}

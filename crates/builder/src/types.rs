use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

// ── Platform types ───────────────────────────────────────────────────────────

/// Configuration platforms recognised as type directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformType {
    Panos,
    Panorama,
}

impl PlatformType {
    /// Type assumed for snippet directories found directly under the template root.
    pub const DEFAULT: Self = Self::Panos;

    pub const ALL: [Self; 2] = [Self::Panos, Self::Panorama];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Panos => "panos",
            Self::Panorama => "panorama",
        }
    }

    /// Match a directory name against the recognised platform names.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dir_name(s).ok_or_else(|| format!("unknown platform type '{s}'"))
    }
}

/// Classification key for a directory registered by the classifier.
///
/// `Flat` is a single fixed key: every flat snippet directory under the
/// template root overwrites the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DirectoryClass {
    /// `root/<platform>/` directory.
    Typed(PlatformType),
    /// Snippet directories sitting directly under the template root.
    Flat,
}

impl DirectoryClass {
    /// Platform type name applied to manifests that do not declare `type`.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Typed(t) => t.as_str(),
            Self::Flat => PlatformType::DEFAULT.as_str(),
        }
    }
}

impl fmt::Display for DirectoryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typed(t) => write!(f, "{t}"),
            Self::Flat => write!(f, "{} (flat)", PlatformType::DEFAULT),
        }
    }
}

// ── Manifest ─────────────────────────────────────────────────────────────────

/// Parsed `.meta-cnc.yaml` metadata shared by every snippet of one directory.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestMetadata {
    /// Path of the manifest file.
    pub path: PathBuf,
    /// Declared `type`; the grouping key of the final collection.
    #[serde(rename = "type")]
    pub skillet_type: Option<String>,
    pub name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    /// The whole parsed document, including keys this crate does not interpret.
    pub document: serde_yaml::Value,
}

impl ManifestMetadata {
    /// Directory that snippet `file` references are resolved against.
    pub fn dir(&self) -> PathBuf {
        self.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

/// One entry of a manifest's `snippets` list.
///
/// Every field is optional at parse time; [`crate::validate`] decides whether
/// the declaration is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnippetDeclaration {
    pub name: Option<String>,
    pub file: Option<String>,
    pub xpath: Option<String>,
}

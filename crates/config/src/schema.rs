use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkilletsConfig {
    /// Directory that remote repositories are cloned into.
    pub store_dir: Option<PathBuf>,
    pub github: GithubConfig,
}

impl SkilletsConfig {
    /// Clone store: the configured directory, else the current directory.
    pub fn store_dir(&self) -> std::io::Result<PathBuf> {
        match &self.store_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }
}

/// Hosted repository search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    /// Repository topic that marks skillet repositories.
    pub topic: String,
    /// Owner whose repositories are searched.
    pub user: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".into(),
            topic: "skillets".into(),
            user: "PaloAltoNetworks".into(),
        }
    }
}

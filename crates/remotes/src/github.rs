//! Discovery of skillet repositories through the GitHub search API.

use std::path::PathBuf;

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    skillets_config::{GithubConfig, SkilletsConfig},
    tracing::{debug, info},
};

use crate::{
    error::{Error, Result},
    git::GitRemote,
};

const USER_AGENT: &str = concat!("skillets/", env!("CARGO_PKG_VERSION"));

/// A repository returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub clone_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
}

/// Searchable index of skillet repositories.
#[async_trait]
pub trait RepositoryIndex: Send + Sync {
    /// Repositories tagged with `topic` and owned by `owner`.
    async fn search(&self, topic: &str, owner: &str) -> Result<Vec<RepositoryDescriptor>>;
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositoryDescriptor>,
}

#[derive(Debug, Clone)]
pub struct GithubIndex {
    api_url: String,
    client: reqwest::Client,
}

impl GithubIndex {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &GithubConfig) -> Self {
        Self::new(&config.api_url)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Search with the configured topic and owner, yielding one uncloned
    /// [`GitRemote`] per repository, rooted in the configured store.
    pub async fn index(&self, config: &SkilletsConfig) -> Result<Vec<GitRemote>> {
        let store: PathBuf = config.store_dir()?;
        let repos = self.search(&config.github.topic, &config.github.user).await?;
        Ok(repos
            .into_iter()
            .map(|repo| GitRemote::new(repo.clone_url, &store))
            .collect())
    }
}

#[async_trait]
impl RepositoryIndex for GithubIndex {
    async fn search(&self, topic: &str, owner: &str) -> Result<Vec<RepositoryDescriptor>> {
        let url = format!("{}/search/repositories", self.api_url);
        let query = format!("topic:{topic} user:{owner}");
        debug!(%url, %query, "searching repositories");

        let resp = self
            .client
            .get(&url)
            .query(&[("q", query.as_str())])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        let value: serde_json::Value = serde_json::from_str(&body).unwrap_or_default();

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_message(&value).unwrap_or(body),
            });
        }

        // GitHub reports query validation failures in an `errors` array.
        let has_errors = value
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .is_some_and(|errors| !errors.is_empty());
        if has_errors {
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_message(&value).unwrap_or_else(|| "search returned errors".into()),
            });
        }

        let parsed: SearchResponse = serde_json::from_value(value)
            .map_err(|e| Error::message(format!("malformed search response: {e}")))?;
        info!(%topic, %owner, count = parsed.items.len(), "repository search complete");
        Ok(parsed.items)
    }
}

fn api_message(value: &serde_json::Value) -> Option<String> {
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

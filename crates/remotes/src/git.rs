use std::path::{Component, Path, PathBuf};

use {
    async_trait::async_trait,
    skillets_builder::{BuildReport, PathBuilder},
    tokio::process::Command,
    tracing::{debug, info, warn},
};

use crate::error::{Context, Error, Result};

// NOTE: shells out to the `git` client rather than linking a git library;
// clone/pull/checkout porcelain is all this module needs.

/// How to treat an existing clone target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CloneOptions {
    /// Delete an existing target directory and clone afresh.
    ///
    /// This is destructive; callers must have confirmed it with the user.
    pub refresh: bool,
    /// Pull when reusing an existing clone, and before branch checkouts.
    pub update: bool,
}

/// A source that can materialise a skillet tree locally.
#[async_trait]
pub trait RemoteFetch: Send + Sync {
    /// Fetch the repository into the store under `name`; returns the local path.
    async fn clone_repo(&mut self, name: &str, options: CloneOptions) -> Result<PathBuf>;

    /// Pull the current branch.
    async fn update(&self) -> Result<()>;

    /// Check out `branch`.
    async fn checkout(&self, branch: &str) -> Result<()>;

    /// Remote branch names without their remote prefix.
    async fn list_remote_branches(&self) -> Result<Vec<String>>;
}

/// A git repository cloned (or to be cloned) into a local store directory.
#[derive(Debug, Clone)]
pub struct GitRemote {
    repo_url: String,
    store: PathBuf,
    path: Option<PathBuf>,
    update: bool,
}

impl GitRemote {
    pub fn new(repo_url: impl Into<String>, store: impl Into<PathBuf>) -> Self {
        Self {
            repo_url: repo_url.into(),
            store: store.into(),
            path: None,
            update: false,
        }
    }

    /// Wrap an existing local checkout.
    pub fn from_local(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(skillets_builder::Error::PathNotFound { path }.into());
        }
        Ok(Self {
            repo_url: path.display().to_string(),
            store: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            path: Some(path),
            update: false,
        })
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn store(&self) -> &Path {
        &self.store
    }

    /// Local checkout path, once cloned.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Build the skillet collection from the local checkout.
    pub fn build(&self, name: &str) -> Result<BuildReport> {
        let path = self.path.as_ref().ok_or(Error::NotCloned)?;
        Ok(PathBuilder::new(path)?.build(name)?)
    }

    fn local_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or(Error::NotCloned)
    }

    fn clone_target(&self, name: &str) -> Result<PathBuf> {
        let mut components = Path::new(name).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(Error::message(format!(
                "invalid repository name '{name}': expected a single directory name"
            )));
        }

        let target = std::path::absolute(self.store.join(name))?;
        let cwd = std::env::current_dir()?;
        let same_as_cwd = match (target.canonicalize(), cwd.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => target == cwd,
        };
        if same_as_cwd {
            return Err(Error::UnsafeTarget {
                path: target,
                reason: "it is the current working directory".into(),
            });
        }
        Ok(target)
    }
}

#[async_trait]
impl RemoteFetch for GitRemote {
    async fn clone_repo(&mut self, name: &str, options: CloneOptions) -> Result<PathBuf> {
        require_git()?;
        self.store = std::path::absolute(&self.store)?;
        let target = self.clone_target(name)?;
        self.update = options.update;

        if target.exists() {
            if options.refresh {
                warn!(path = %target.display(), "refresh requested, removing existing clone");
                tokio::fs::remove_dir_all(&target)
                    .await
                    .with_context(|| format!("failed to remove {}", target.display()))?;
            } else {
                debug!(path = %target.display(), "reusing existing clone");
                self.path = Some(target.clone());
                if options.update {
                    info!(path = %target.display(), "updating repository");
                    self.update().await?;
                }
                return Ok(target);
            }
        }

        tokio::fs::create_dir_all(&self.store).await?;
        info!(url = %self.repo_url, path = %target.display(), "cloning repository");
        // Run from the process cwd so a relative (local) repository URL
        // resolves the way the caller wrote it.
        let cwd = std::env::current_dir()?;
        let target_arg = target.to_string_lossy().into_owned();
        run_git(&cwd, &["clone", &self.repo_url, &target_arg]).await?;

        self.path = Some(target.clone());
        Ok(target)
    }

    async fn update(&self) -> Result<()> {
        run_git(self.local_path()?, &["pull"]).await.map(drop)
    }

    async fn checkout(&self, branch: &str) -> Result<()> {
        let path = self.local_path()?;
        info!(%branch, path = %path.display(), "checking out branch");
        if self.update {
            self.update().await?;
        }
        run_git(path, &["checkout", branch]).await.map(drop)
    }

    async fn list_remote_branches(&self) -> Result<Vec<String>> {
        let stdout = run_git(self.local_path()?, &["branch", "-r"]).await?;
        Ok(parse_remote_branches(&stdout))
    }
}

/// Fail with [`Error::GitNotFound`] when no git client is on `PATH`.
pub fn require_git() -> Result<()> {
    which::which("git").map(drop).map_err(|_| Error::GitNotFound)
}

async fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    debug!(dir = %dir.display(), ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .with_context(|| format!("failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        return Err(Error::Git {
            command: args.first().copied().unwrap_or_default().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `git branch -r` output into branch names without the remote prefix.
///
/// Only the remote name is removed, so slash-separated branch names survive
/// intact (`origin/feature/x` yields `feature/x`, not just `x`). Symbolic
/// entries such as `origin/HEAD -> origin/main` are skipped.
pub fn parse_remote_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains("->"))
        .map(|line| match line.split_once('/') {
            Some((_remote, branch)) => branch.to_string(),
            None => line.to_string(),
        })
        .collect()
}

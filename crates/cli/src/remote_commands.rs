//! Commands that talk to git remotes and the hosted repository index.

use std::{
    io::{BufRead, Write},
    path::Path,
};

use {
    anyhow::{Result, bail},
    clap::Args,
    skillets_config::SkilletsConfig,
    skillets_remotes::{CloneOptions, GitRemote, GithubIndex, RemoteFetch, RepositoryIndex},
    tracing::info,
};

use crate::build_commands;

#[derive(Args)]
pub struct CloneArgs {
    /// Repository URL.
    pub url: String,
    /// Directory name inside the store (defaults to the repository name).
    #[arg(long)]
    pub name: Option<String>,
    /// Delete an existing clone and clone again.
    #[arg(long)]
    pub refresh: bool,
    /// Pull an existing clone, and pull before checking out a branch.
    #[arg(long)]
    pub update: bool,
    /// Branch to check out after cloning.
    #[arg(long)]
    pub branch: Option<String>,
    /// Skip the confirmation prompt for `--refresh`.
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Build the collection from the clone and print its summary.
    #[arg(long)]
    pub build: bool,
}

pub async fn handle_search(
    config: &SkilletsConfig,
    topic: Option<String>,
    user: Option<String>,
    json: bool,
) -> Result<()> {
    let topic = topic.unwrap_or_else(|| config.github.topic.clone());
    let user = user.unwrap_or_else(|| config.github.user.clone());

    let index = GithubIndex::from_config(&config.github);
    let repos = index.search(&topic, &user).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&repos)?);
        return Ok(());
    }
    if repos.is_empty() {
        println!("No repositories found for topic '{topic}' owned by '{user}'.");
    }
    for repo in &repos {
        match repo.description.as_deref() {
            Some(desc) if !desc.is_empty() => println!("  {}: {desc}", repo.name),
            _ => println!("  {}", repo.name),
        }
        println!("    {}", repo.clone_url);
    }
    Ok(())
}

pub async fn handle_clone(config: &SkilletsConfig, args: CloneArgs) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => repo_name_from_url(&args.url)
            .ok_or_else(|| anyhow::anyhow!("cannot derive a name from '{}'", args.url))?,
    };
    let store = config.store_dir()?;

    if args.refresh && store.join(&name).exists() && !args.yes {
        let prompt = format!(
            "This will delete {} and clone it again. Continue? [y/N] ",
            store.join(&name).display()
        );
        if !confirm(&prompt)? {
            bail!("aborted, existing clone left in place");
        }
    }

    let mut remote = GitRemote::new(&args.url, &store);
    let path = remote
        .clone_repo(&name, CloneOptions {
            refresh: args.refresh,
            update: args.update,
        })
        .await?;
    println!("Cloned into {}", path.display());

    if let Some(branch) = args.branch.as_deref() {
        remote.checkout(branch).await?;
        println!("Checked out {branch}");
    }

    if args.build {
        let report = remote.build(&name)?;
        build_commands::print_diagnostics(&report.diagnostics);
        print!("{}", build_commands::render_summary(&report));
    }
    Ok(())
}

pub async fn handle_branches(path: &Path) -> Result<()> {
    let remote = GitRemote::from_local(path)?;
    let branches = remote.list_remote_branches().await?;
    info!(path = %path.display(), count = branches.len(), "listed remote branches");
    for branch in branches {
        println!("{branch}");
    }
    Ok(())
}

/// Last path segment of a clone URL, without `.git`.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let last = url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()?
        .trim_end_matches(".git");
    (!last.is_empty()).then(|| last.to_string())
}

/// Ask on stdin; only an explicit `y`/`Y` answer confirms.
fn confirm(prompt: &str) -> Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_repo_name() {
        assert_eq!(
            repo_name_from_url("https://github.com/PaloAltoNetworks/iron-skillet.git").as_deref(),
            Some("iron-skillet")
        );
        assert_eq!(
            repo_name_from_url("git@github.com:org/repo").as_deref(),
            Some("repo")
        );
        assert_eq!(
            repo_name_from_url("https://example.com/a/b/").as_deref(),
            Some("b")
        );
        assert_eq!(repo_name_from_url(""), None);
    }
}

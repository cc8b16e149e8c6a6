//! Remote sources of skillet trees.
//!
//! [`git::GitRemote`] fetches a repository into a local store with the `git`
//! client; [`github::GithubIndex`] finds candidate repositories through the
//! GitHub search API. Both only ever hand a local path to
//! [`skillets_builder::PathBuilder`].

pub mod error;
pub mod git;
pub mod github;

pub use {
    error::{Error, Result},
    git::{CloneOptions, GitRemote, RemoteFetch},
    github::{GithubIndex, RepositoryDescriptor, RepositoryIndex},
};

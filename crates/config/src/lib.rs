//! Configuration loading and env substitution.
//!
//! Config files: `skillets.toml`, `skillets.yaml`, `skillets.yml` or
//! `skillets.json`, searched in `./` then `~/.config/skillets/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{
        clear_config_dir, config_dir, discover_and_load, find_config_file, load_config,
        set_config_dir,
    },
    schema::{GithubConfig, SkilletsConfig},
};

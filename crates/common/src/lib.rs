//! Error plumbing shared by the skillets crates.

pub mod error;

pub use error::FromMessage;

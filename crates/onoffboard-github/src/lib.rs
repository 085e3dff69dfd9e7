//! GitHub team membership mutator for onoffboard.
//!
//! Grants add a login to a team (`PUT`), revokes remove it (`DELETE`).
//! Whatever GitHub answers is reported as-is; there is no read-back and no
//! retry.

mod client;
mod error;

pub use client::{GitHubClient, GitHubConfig, DEFAULT_API_URL};
pub use error::{GitHubError, GitHubResult};

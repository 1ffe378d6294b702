//! Drive an installed command-line `git` from Rust.
//!
//! `gitwrap` never reads or writes git's on-disk object format itself. Every
//! operation becomes exactly one invocation of the host's `git` executable,
//! run in the repository's root directory, with both output streams captured.
//!
//! ```no_run
//! use gitwrap::Repository;
//!
//! # fn main() -> gitwrap::Result<()> {
//! let repo = Repository::create("/tmp/scratch")?;
//! repo.set_env("GIT_AUTHOR_NAME", "A U Thor");
//! repo.add(&["README"])?;
//! repo.commit("Initial commit", true, None)?;
//! # Ok(())
//! # }
//! ```

pub mod command;
pub use command::{quote, Args};

pub mod config;
pub use config::Config;

pub mod repo;
pub use repo::{Error, LogOptions, Repository, RepositoryLocator, ResetMode, Result};

pub mod runner;
pub use runner::{CommandOutcome, CommandRunner};

#[cfg(test)]
mod test_support;

//! Exchanging commits with other repositories.

use std::ffi::OsStr;

use super::{Repository, Result};
use crate::command::Args;

impl Repository {
    /// Clone this repository into `target` (`git clone --local`). A relative
    /// `target` is taken relative to this repository's root.
    pub fn clone_to<S: AsRef<OsStr>>(&self, target: S) -> Result<String> {
        self.git(
            Args::new("clone")
                .flag("--local")
                .operand(self.root_path())
                .operand(target),
        )
    }

    /// Runs `git fetch`, with `--dry-run` if asked.
    pub fn fetch(&self, dry_run: bool) -> Result<String> {
        self.git(Args::new("fetch").flag_if(dry_run, "--dry-run"))
    }

    /// Runs `git push [remote [branch]]`. Omitted parts fall back to git's
    /// configured defaults.
    pub fn push(&self, remote: Option<&str>, branch: Option<&str>) -> Result<String> {
        self.git(with_remote(Args::new("push"), remote, branch))
    }

    /// Runs `git pull [remote [branch]]`.
    pub fn pull(&self, remote: Option<&str>, branch: Option<&str>) -> Result<String> {
        self.git(with_remote(Args::new("pull"), remote, branch))
    }
}

// A branch without a remote would be read as a remote name, so it is
// dropped.
fn with_remote(args: Args, remote: Option<&str>, branch: Option<&str>) -> Args {
    match remote {
        Some(remote) => args.operand(remote).operand_opt(branch),
        None => args,
    }
}

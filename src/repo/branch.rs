//! Local and remote-tracking branches.

use std::ffi::OsStr;

use regex::Regex;
use tracing::debug;

use super::{lines, Repository, Result};
use crate::command::Args;

const ACTIVE_MARK: &str = "* ";
const SYMREF_ARROW: &str = "HEAD -> ";

impl Repository {
    /// Runs `git branch <name>`.
    pub fn create_branch(&self, name: &str) -> Result<String> {
        self.git(Args::new("branch").operand(name))
    }

    /// Runs `git branch -d <name>`, or `-D` if `force`.
    pub fn delete_branch(&self, name: &str, force: bool) -> Result<String> {
        let flag = if force { "-D" } else { "-d" };
        self.git(Args::new("branch").flag(flag).operand(name))
    }

    /// Return the local branch names. The current branch keeps its leading
    /// `* ` only if `keep_asterisk`.
    pub fn list_branches(&self, keep_asterisk: bool) -> Result<Vec<String>> {
        let output = self.git(Args::new("branch"))?;

        Ok(lines(&output)
            .into_iter()
            .map(|branch| {
                if keep_asterisk {
                    branch
                } else {
                    branch.replacen(ACTIVE_MARK, "", 1)
                }
            })
            .collect())
    }

    /// Return the remote-tracking branch names (`git branch -r`), without
    /// symbolic entries such as `origin/HEAD -> origin/main`.
    pub fn list_remote_branches(&self) -> Result<Vec<String>> {
        let output = self.git(Args::new("branch").flag("-r"))?;

        Ok(lines(&output)
            .into_iter()
            .filter(|branch| !branch.contains(SYMREF_ARROW))
            .collect())
    }

    /// Return the checked-out branch, or `None` if there is none (before the
    /// first commit, for instance).
    pub fn active_branch(&self, keep_asterisk: bool) -> Result<Option<String>> {
        let active = self
            .list_branches(true)?
            .into_iter()
            .find(|branch| branch.starts_with('*'));

        Ok(active.map(|branch| {
            if keep_asterisk {
                branch
            } else {
                branch.replacen(ACTIVE_MARK, "", 1)
            }
        }))
    }

    /// Runs `git checkout <name>`.
    pub fn checkout(&self, name: &str) -> Result<String> {
        self.git(Args::new("checkout").operand(name))
    }

    /// Runs `git merge <name> --no-ff`.
    pub fn merge(&self, name: &str) -> Result<String> {
        self.git(Args::new("merge").operand(name).flag("--no-ff"))
    }

    /// Runs `git merge --abort`.
    pub fn merge_abort(&self) -> Result<String> {
        self.git(Args::new("merge").flag("--abort"))
    }

    /// Remote-tracking branches whose name matches the regular expression
    /// `pattern`.
    ///
    /// Best effort: if git fails or `pattern` is not a valid expression,
    /// returns an empty list.
    pub fn remote_branches_matching(&self, pattern: &str) -> Vec<String> {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(err) => {
                debug!("Bad branch pattern {:?}: {}", pattern, err);
                return Vec::new();
            }
        };

        match self.list_remote_branches() {
            Ok(branches) => branches.into_iter().filter(|b| re.is_match(b)).collect(),
            Err(err) => {
                debug!("Listing remote branches failed: {}", err);
                Vec::new()
            }
        }
    }

    /// Number of remote-tracking branches. Best effort: 0 if git fails.
    pub fn remote_branch_count(&self) -> usize {
        match self.git(Args::new("branch").flag("-r")) {
            Ok(output) => lines(&output).len(),
            Err(err) => {
                debug!("Listing remote branches failed: {}", err);
                0
            }
        }
    }

    /// Runs `git push <remote> --delete <branches...>`.
    pub fn delete_remote_branches<I, S>(&self, remote: &str, branches: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.git(
            Args::new("push")
                .operand(remote)
                .flag("--delete")
                .operands(branches),
        )
    }

    /// Runs `git remote prune <remote>`, dropping remote-tracking branches
    /// that no longer exist on the remote.
    pub fn remote_prune(&self, remote: &str) -> Result<String> {
        self.git(Args::new("remote").flag("prune").operand(remote))
    }
}

//! Index and working-tree operations.

use std::ffi::OsStr;

use tracing::debug;

use super::{Repository, Result};
use crate::command::Args;

/// How far `git reset` rewinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResetMode {
    Soft,
    Mixed,
    Hard,
    Merge,
    Keep,
}

impl ResetMode {
    fn flag(self) -> &'static str {
        match self {
            ResetMode::Soft => "--soft",
            ResetMode::Mixed => "--mixed",
            ResetMode::Hard => "--hard",
            ResetMode::Merge => "--merge",
            ResetMode::Keep => "--keep",
        }
    }
}

impl Repository {
    /// Runs `git status`.
    pub fn status(&self) -> Result<String> {
        self.git(Args::new("status"))
    }

    /// Runs `git add -v` on `files`. With no files, adds everything matching
    /// the pathspec `*`.
    pub fn add<I, S>(&self, files: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.git(with_default_pathspec(Args::new("add"), files).flag("-v"))
    }

    /// Runs `git rm` on `files`, keeping the working copies if `cached`.
    pub fn rm<I, S>(&self, files: I, cached: bool) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args = Args::new("rm").flag_if(cached, "--cached");
        self.git(with_default_pathspec(args, files))
    }

    /// Runs `git commit -m <message>`, with `-a` if `commit_all` and
    /// `--author` if `author` is given.
    pub fn commit(&self, message: &str, commit_all: bool, author: Option<&str>) -> Result<String> {
        let mut args = Args::new("commit");
        if let Some(author) = author.filter(|a| !a.is_empty()) {
            args = args.option("--author", author);
        }

        let args = if commit_all {
            args.flag("-av")
        } else {
            args.flag("-v")
        };

        self.git(args.flag("-m").value(message))
    }

    /// Runs `git clean`, removing untracked directories too if `dirs`.
    /// git refuses to clean without `force` unless configured otherwise.
    pub fn clean(&self, dirs: bool, force: bool) -> Result<String> {
        self.git(
            Args::new("clean")
                .flag_if(force, "-f")
                .flag_if(dirs, "-d"),
        )
    }

    /// Runs `git reset` in `mode`, to `target` if given (default `HEAD`).
    pub fn reset(&self, mode: ResetMode, target: Option<&str>) -> Result<String> {
        self.git(Args::new("reset").flag(mode.flag()).operand_opt(target))
    }

    /// Runs `git stash`.
    pub fn stash(&self) -> Result<String> {
        self.git(Args::new("stash"))
    }

    /// Runs `git stash pop`.
    pub fn stash_pop(&self) -> Result<String> {
        self.git(Args::new("stash").flag("pop"))
    }

    /// Runs `git diff` with `args` (revisions and paths). Each is passed as
    /// an operand, so none is read as an option.
    pub fn diff<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.git(Args::new("diff").operands(args))
    }

    /// Runs `git diff --cached`.
    pub fn diff_cached(&self) -> Result<String> {
        self.git(Args::new("diff").flag("--cached"))
    }

    /// Runs `git gc`, with `--aggressive` if asked. Best effort: returns
    /// `false` instead of an error if git fails.
    pub fn gc(&self, aggressive: bool) -> bool {
        match self.git(Args::new("gc").flag_if(aggressive, "--aggressive")) {
            Ok(_) => true,
            Err(err) => {
                debug!("gc failed in {}: {}", self.root_path().display(), err);
                false
            }
        }
    }
}

fn with_default_pathspec<I, S>(args: Args, files: I) -> Args
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args = args.paths(files);
    if args.has_paths() {
        args
    } else {
        args.path("*")
    }
}

//! Reading commit history.

use std::path::PathBuf;

use super::{Repository, Result};
use crate::command::Args;

/// Options for [`Repository::log`].
///
/// `LogOptions::default()` is a plain `git log`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LogOptions {
    /// `--pretty=format:<format>`.
    pub format: Option<String>,

    /// Only commits touching this path.
    pub path: Option<PathBuf>,

    /// At most this many commits (`--max-count`). Zero means no limit.
    pub limit: usize,

    /// Skip this many commits first (`--skip`).
    pub skip: usize,

    /// Pickaxe search: commits that change the number of occurrences of this
    /// string (`-S`).
    pub search: Option<String>,

    /// Show the full patch of each commit, not just the filtered path
    /// (`--full-diff -p`).
    pub full_diff: bool,

    /// Follow `path` across renames (`--follow`). Takes precedence over
    /// `full_diff`, which git does not allow together with it.
    pub follow: bool,
}

impl LogOptions {
    /// A log printed with `--pretty=format:<format>`.
    pub fn with_format<S: Into<String>>(format: S) -> Self {
        LogOptions {
            format: Some(format.into()),
            ..LogOptions::default()
        }
    }

    fn to_args(&self) -> Args {
        let mut args = Args::new("log");

        if self.limit > 0 {
            args = args.option("--max-count", self.limit.to_string());
        }

        if self.skip > 0 {
            args = args.option("--skip", self.skip.to_string());
        }

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            args = args.attached("-S", search);
        }

        args = with_format(args, self.format.as_deref());

        if self.follow {
            args = args.flag("--follow");
        } else if self.full_diff {
            args = args.flag("--full-diff").flag("-p");
        }

        match &self.path {
            Some(path) => args.path(path),
            None => args,
        }
    }
}

impl Repository {
    /// Runs `git log` as described by `options`.
    pub fn log(&self, options: &LogOptions) -> Result<String> {
        self.git(options.to_args())
    }

    /// Runs `git log --grep=<pattern>`.
    pub fn log_grep(&self, pattern: &str, format: Option<&str>) -> Result<String> {
        self.git(with_format(
            Args::new("log").option("--grep", pattern),
            format,
        ))
    }

    /// Runs `git log <start>..<end>`, optionally limited to `path`.
    pub fn log_revision_range(
        &self,
        start: &str,
        end: &str,
        format: Option<&str>,
        path: Option<&str>,
    ) -> Result<String> {
        let args = Args::new("log").operand(format!("{}..{}", start, end));
        let args = with_format(args, format);

        self.git(match path.filter(|p| !p.is_empty()) {
            Some(path) => args.path(path),
            None => args,
        })
    }

    /// Runs `git show`. With both a commit and a path, shows that path as of
    /// that commit (`<commit>:<path>`).
    pub fn show(&self, path: Option<&str>, commit: Option<&str>) -> Result<String> {
        let path = path.filter(|p| !p.is_empty());
        let commit = commit.filter(|c| !c.is_empty());

        let object = match (commit, path) {
            (Some(commit), Some(path)) => Some(format!("{}:{}", commit, path)),
            (Some(commit), None) => Some(commit.to_string()),
            (None, Some(path)) => Some(path.to_string()),
            (None, None) => None,
        };

        self.git(Args::new("show").operand_opt(object))
    }

    /// Return the full hash of `HEAD`.
    pub fn rev_parse_head(&self) -> Result<String> {
        let output = self.git(Args::new("rev-parse").flag("HEAD"))?;
        Ok(output.trim().to_string())
    }
}

fn with_format(args: Args, format: Option<&str>) -> Args {
    match format {
        Some(format) => args.option("--pretty", format!("format:{}", format)),
        None => args,
    }
}

//! Repository handles.
//!
//! A [`Repository`] binds a validated directory to the [`CommandRunner`]
//! that runs git there. Handles are obtained from a [`RepositoryLocator`],
//! which classifies a path as a working tree, a bare repository, or a place
//! where a new repository may be created.
//!
//! The git operations themselves (`status`, `commit`, `branch`, `log`, ...)
//! are methods on `Repository`, grouped by topic in the submodules below.
//! Each one builds its command line with [`Args`] and returns git's output
//! as text, sometimes split into lines.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use parking_lot::RwLock;

use crate::{command::Args, config::Config, runner::CommandOutcome, runner::CommandRunner};

mod error;
pub use error::{Error, Result};

mod locate;
pub use locate::RepositoryLocator;

mod branch;
mod history;
pub use history::LogOptions;

mod remote;
mod tag;
mod working_tree;
pub use working_tree::ResetMode;

const DESCRIPTION_FILE: &str = "description";

/// A git repository on the local file system, driven through command-line
/// git.
///
/// A handle holds no open files or processes between calls. Its environment
/// overrides may be changed at any time, from any thread; each command reads
/// a snapshot of them when it starts.
///
/// Commands issued concurrently against one handle are not serialized. git
/// guards its index with a lock file, so two writers racing on the same
/// working tree can make one of them fail. Wrap the handle in a `Mutex` if
/// that matters.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    bare: bool,
    env: RwLock<BTreeMap<String, String>>,
    runner: CommandRunner,
}

impl Repository {
    pub(crate) fn new(root: PathBuf, bare: bool, runner: CommandRunner) -> Self {
        Repository {
            root,
            bare,
            env: RwLock::new(BTreeMap::new()),
            runner,
        }
    }

    /// Open an existing working tree or bare repository using the default
    /// [`Config`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        RepositoryLocator::default().open(path)
    }

    /// Create a new repository at `path` and run `git init` in it, using the
    /// default [`Config`].
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        RepositoryLocator::default().create(path)
    }

    /// Create a repository at `path` by cloning the local repository at
    /// `source`, using the default [`Config`].
    pub fn create_from<P, S>(path: P, source: S) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        RepositoryLocator::default().create_from(path, source)
    }

    /// Create a repository at `path` by cloning `remote`, optionally
    /// borrowing objects from the local repository at `reference`, using
    /// the default [`Config`].
    pub fn clone_remote<P, S>(path: P, remote: S, reference: Option<&Path>) -> Result<Self>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        RepositoryLocator::default().clone_remote(path, remote, reference)
    }

    /// Return the working directory, or the repository directory itself if
    /// the repository is bare.
    pub fn root_path(&self) -> &Path {
        self.root.as_path()
    }

    /// Return `true` for a bare repository.
    pub fn is_bare(&self) -> bool {
        self.bare
    }

    /// Return the configuration used to run git for this repository.
    pub fn config(&self) -> &Config {
        self.runner.config()
    }

    /// Return the runner bound to this repository's configuration.
    pub fn runner(&self) -> &CommandRunner {
        &self.runner
    }

    /// Return the directory holding git's metadata: the root itself for a
    /// bare repository, otherwise `.git` or the target of a `.git` file.
    pub fn git_dir(&self) -> Result<PathBuf> {
        if self.bare {
            return Ok(self.root.clone());
        }

        match locate::find_git_dir(&self.root) {
            locate::GitDir::Found(git_dir) => Ok(git_dir),
            _ => Err(Error::GitDirNotFound(self.root.clone())),
        }
    }

    /// Read the repository's `description` file verbatim.
    pub fn description(&self) -> Result<String> {
        let path = self.git_dir()?.join(DESCRIPTION_FILE);
        Ok(fs::read_to_string(path)?)
    }

    /// Replace the repository's `description` file with exactly `text`.
    pub fn set_description<T: AsRef<[u8]>>(&self, text: T) -> Result<()> {
        let path = self.git_dir()?.join(DESCRIPTION_FILE);
        fs::write(path, text).map_err(|e| e.into())
    }

    /// Set an environment variable for every later command on this handle.
    /// It takes precedence over the variable of the same name in the host
    /// environment.
    pub fn set_env<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.env.write().insert(key.into(), value.into());
    }

    /// Drop an override added with [`Repository::set_env`]. Returns its value
    /// if there was one.
    pub fn remove_env(&self, key: &str) -> Option<String> {
        self.env.write().remove(key)
    }

    /// Return a snapshot of the environment overrides.
    pub fn env(&self) -> Vec<(String, String)> {
        self.env
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Run git with `args`. A nonzero exit becomes
    /// [`Error::ExecutionFailed`].
    pub fn run(&self, args: &Args) -> Result<CommandOutcome> {
        self.runner.run(self, args)
    }

    /// Run an arbitrary `program` with `args` in this repository's root.
    /// The outcome is returned whatever the exit status.
    pub fn execute<P: AsRef<OsStr>>(&self, program: P, args: &Args) -> Result<CommandOutcome> {
        self.runner.execute(self, program, args)
    }

    /// Return `true` if the configured git executable can be started.
    pub fn git_available(&self) -> bool {
        self.runner.git_available()
    }

    pub(crate) fn git(&self, args: Args) -> Result<String> {
        Ok(self.run(&args)?.into_stdout())
    }

    pub(crate) fn init(&self) -> Result<()> {
        self.git(Args::new("init"))?;
        Ok(())
    }
}

// Split command output into trimmed, non-empty lines.
fn lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests;

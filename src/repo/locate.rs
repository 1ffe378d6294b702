use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use super::{Error, Repository, Result};
use crate::{command::Args, config::Config, runner::CommandRunner};

const DOT_GIT: &str = ".git";
const GITDIR_PREFIX: &str = "gitdir:";
const CONFIG_FILE: &str = "config";

/// Turns filesystem paths into validated [`Repository`] handles.
///
/// Every handle produced by a locator shares its [`Config`].
#[derive(Clone, Debug, Default)]
pub struct RepositoryLocator {
    runner: CommandRunner,
}

impl RepositoryLocator {
    /// Create a locator whose handles run git according to `config`.
    pub fn new(config: Config) -> Self {
        RepositoryLocator {
            runner: CommandRunner::new(config),
        }
    }

    /// Return the configuration handed to every repository.
    pub fn config(&self) -> &Config {
        self.runner.config()
    }

    /// Classify `path` and return a handle for it.
    ///
    /// * An existing directory containing `.git` (a directory, or a file
    ///   reading `gitdir: <path>`) is a working tree.
    /// * Otherwise, an existing directory whose `config` file sets
    ///   `core.bare` to true is a bare repository.
    /// * If `allow_create` is set, any other existing directory, or a
    ///   missing directory whose parent exists, is accepted as the place for
    ///   a new repository. The directory is created if needed, and
    ///   `git init` is run in it if `auto_init` is set.
    ///
    /// With `allow_create`, a path that already holds a repository is an
    /// error ([`Error::AlreadyExists`]) rather than being reused.
    ///
    /// Nothing is returned unless the whole resolution succeeds. If
    /// `git init` fails in a directory created by this call, that directory
    /// is removed again.
    pub fn resolve<P: AsRef<Path>>(
        &self,
        path: P,
        allow_create: bool,
        auto_init: bool,
    ) -> Result<Repository> {
        let path = path.as_ref();

        if allow_create && path.as_os_str().is_empty() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        match fs::canonicalize(path) {
            Ok(root) => self.resolve_existing(root, allow_create, auto_init),
            Err(err) => {
                debug!("Can't canonicalize {}: {}", path.display(), err);
                if allow_create {
                    self.create_missing(path, auto_init)
                } else {
                    Err(Error::NotFound(path.to_path_buf()))
                }
            }
        }
    }

    /// Open an existing working tree or bare repository.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Repository> {
        self.resolve(path, false, false)
    }

    /// Create a new repository at `path` and run `git init` in it.
    pub fn create<P: AsRef<Path>>(&self, path: P) -> Result<Repository> {
        self.resolve(path, true, true)
    }

    /// Create a repository at `path` by cloning the local repository at
    /// `source` (`git clone --local`).
    pub fn create_from<P, S>(&self, path: P, source: S) -> Result<Repository>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        let repo = self.clone_into(
            path.as_ref(),
            Args::new("clone").flag("--local").operand(source.as_ref()),
        )?;

        info!(
            "Cloned {} into {}",
            Path::new(source.as_ref()).display(),
            repo.root_path().display()
        );
        Ok(repo)
    }

    /// Create a repository at `path` by cloning `remote`.
    ///
    /// If `reference` is given it must itself be a repository; git borrows
    /// objects from it (`git clone --reference`). It is checked before
    /// anything is created.
    pub fn clone_remote<P, S>(
        &self,
        path: P,
        remote: S,
        reference: Option<&Path>,
    ) -> Result<Repository>
    where
        P: AsRef<Path>,
        S: AsRef<OsStr>,
    {
        let reference = match reference {
            Some(reference) => Some(
                self.open(reference)
                    .map_err(|_| Error::ReferenceInvalid(reference.to_path_buf()))?
                    .root
                    .clone(),
            ),
            None => None,
        };

        let mut args = Args::new("clone");
        if let Some(reference) = &reference {
            args = args.flag("--reference").value(reference);
        }
        let repo = self.clone_into(path.as_ref(), args.operand(remote.as_ref()))?;

        info!(
            "Cloned {} into {}",
            Path::new(remote.as_ref()).display(),
            repo.root_path().display()
        );
        Ok(repo)
    }

    // Runs `args` with the new repository's root appended as the clone
    // destination. If git fails, a directory created by this call is
    // removed again.
    fn clone_into(&self, path: &Path, args: Args) -> Result<Repository> {
        let created = !path.exists();
        let repo = self.resolve(path, true, false)?;

        if let Err(err) = repo.git(args.operand(repo.root_path())) {
            if created {
                fs::remove_dir_all(repo.root_path()).unwrap_or(());
            }
            return Err(err);
        }

        Ok(repo)
    }

    fn resolve_existing(
        &self,
        root: PathBuf,
        allow_create: bool,
        auto_init: bool,
    ) -> Result<Repository> {
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        let bare = match find_git_dir(&root) {
            GitDir::Found(_) => false,
            GitDir::Malformed => return Err(Error::NotAGitRepository(root)),
            GitDir::Missing if is_bare_repo(&root) => true,
            GitDir::Missing => {
                if !allow_create {
                    return Err(Error::NotAGitRepository(root));
                }

                let repo = self.handle(root, false);
                if auto_init {
                    repo.init()?;
                    info!("Initialized repository in {}", repo.root_path().display());
                }
                return Ok(repo);
            }
        };

        if allow_create {
            return Err(Error::AlreadyExists(root));
        }

        debug!("Opened {} (bare: {})", root.display(), bare);
        Ok(self.handle(root, bare))
    }

    fn create_missing(&self, path: &Path, auto_init: bool) -> Result<Repository> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        fs::create_dir(path)?;
        let root = fs::canonicalize(path)?;
        let repo = self.handle(root, false);

        if auto_init {
            if let Err(err) = repo.init() {
                fs::remove_dir_all(repo.root_path()).unwrap_or(());
                return Err(err);
            }
        }

        info!("Created repository directory {}", repo.root_path().display());
        Ok(repo)
    }

    fn handle(&self, root: PathBuf, bare: bool) -> Repository {
        Repository::new(root, bare, self.runner.clone())
    }
}

/// What a working tree's `.git` entry points to.
#[derive(Debug, Eq, PartialEq)]
pub(crate) enum GitDir {
    Found(PathBuf),
    Malformed,
    Missing,
}

pub(crate) fn find_git_dir(root: &Path) -> GitDir {
    let dot_git = root.join(DOT_GIT);

    if dot_git.is_dir() {
        GitDir::Found(dot_git)
    } else if dot_git.is_file() {
        match fs::read_to_string(&dot_git)
            .ok()
            .as_deref()
            .and_then(parse_gitfile)
        {
            Some(target) => GitDir::Found(root.join(target)),
            None => GitDir::Malformed,
        }
    } else {
        GitDir::Missing
    }
}

// A `.git` file holds a single line `gitdir: <path>`. A relative path is
// relative to the directory containing the file.
fn parse_gitfile(contents: &str) -> Option<&str> {
    let line = contents.lines().next()?;
    let target = line.strip_prefix(GITDIR_PREFIX)?.trim();

    if target.is_empty() {
        None
    } else {
        Some(target)
    }
}

fn is_bare_repo(root: &Path) -> bool {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.is_file() {
        return false;
    }

    fs::read_to_string(config_path)
        .map(|config| core_bare(&config).unwrap_or(false))
        .unwrap_or(false)
}

// Find `bare` in the `[core]` section of a git config file. A key without a
// value is true, as in git.
fn core_bare(config: &str) -> Option<bool> {
    let mut in_core = false;
    let mut bare = None;

    for line in config.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let section = line.trim_start_matches('[').trim_end_matches(']').trim();
            in_core = section.eq_ignore_ascii_case("core");
            continue;
        }

        if !in_core {
            continue;
        }

        let (key, value) = match line.find('=') {
            Some(i) => (line[..i].trim(), Some(line[i + 1..].trim())),
            None => (line, None),
        };

        if key.eq_ignore_ascii_case("bare") {
            bare = match value {
                None => Some(true),
                Some(value) => parse_bool(value),
            };
        }
    }

    bare
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value
        .split(|c| c == '#' || c == ';')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches('"');

    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" | "" => Some(false),
        _ => None,
    }
}

//! Process-level settings shared by the locator, runner, and every
//! repository handle.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

/// Conventional install location of command-line git on Unix-like hosts.
pub const DEFAULT_GIT_BIN: &str = "/usr/bin/git";

/// Fallback executable name, resolved through `PATH` at spawn time.
pub const FALLBACK_GIT_BIN: &str = "git";

/// Overrides the git executable in [`Config::from_env`].
pub const GIT_BIN_ENV: &str = "GITWRAP_GIT_BIN";

/// Sets a timeout (whole seconds) in [`Config::from_env`].
pub const TIMEOUT_ENV: &str = "GITWRAP_TIMEOUT_SECS";

/// Which git to run and how long to let it run.
///
/// A `Config` is handed to a [`RepositoryLocator`](crate::RepositoryLocator)
/// once and then cloned into every handle it produces, so it is normally
/// settled at startup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    git_bin: PathBuf,
    timeout: Option<Duration>,
}

impl Default for Config {
    /// Uses `/usr/bin/git` if present, otherwise `git` from `PATH`.
    /// No timeout.
    fn default() -> Self {
        let git_bin = if Path::new(DEFAULT_GIT_BIN).exists() {
            DEFAULT_GIT_BIN
        } else {
            FALLBACK_GIT_BIN
        };

        Config {
            git_bin: PathBuf::from(git_bin),
            timeout: None,
        }
    }
}

impl Config {
    /// Configuration for hosts where git is only reachable through `PATH`
    /// (typically Windows).
    pub fn windows() -> Self {
        Config {
            git_bin: PathBuf::from(FALLBACK_GIT_BIN),
            timeout: None,
        }
    }

    /// Starts from [`Config::default`] and applies `GITWRAP_GIT_BIN` and
    /// `GITWRAP_TIMEOUT_SECS` when they are set. A timeout value that is not
    /// a whole number of seconds is ignored.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Some(bin) = env::var_os(GIT_BIN_ENV).filter(|v| !v.is_empty()) {
            config.git_bin = PathBuf::from(bin);
        }

        if let Some(secs) = env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Some(Duration::from_secs(secs));
        }

        config
    }

    /// Replace the git executable.
    pub fn with_git_bin<P: Into<PathBuf>>(mut self, git_bin: P) -> Self {
        self.git_bin = git_bin.into();
        self
    }

    /// Kill any command still running after `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Return the git executable.
    pub fn git_bin(&self) -> &Path {
        self.git_bin.as_path()
    }

    /// Return the per-command timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

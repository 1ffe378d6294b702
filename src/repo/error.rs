use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

/// Describes the potential error conditions that might arise from locating
/// a repository or running git against it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("\"{0}\" does not exist")]
    NotFound(PathBuf),

    #[error("cannot create repository at \"{0}\": parent directory does not exist")]
    InvalidPath(PathBuf),

    #[error("\"{0}\" is not a directory")]
    NotADirectory(PathBuf),

    #[error("\"{0}\" is not a git repository")]
    NotAGitRepository(PathBuf),

    #[error("\"{0}\" is already a git repository")]
    AlreadyExists(PathBuf),

    #[error("\"{0}\" is not a git repository; cannot use as reference")]
    ReferenceInvalid(PathBuf),

    #[error("could not find git dir for \"{0}\"")]
    GitDirNotFound(PathBuf),

    #[error("could not run {command}: {source}")]
    SpawnFailure {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} failed ({}):\n{output}", exit_code_text(.code))]
    ExecutionFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("{command} timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },

    #[error(transparent)]
    IoError(#[from] io::Error),
}

impl Error {
    /// For [`Error::ExecutionFailed`], the verbatim output of the failed
    /// command (stderr, a newline, then stdout).
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Error::ExecutionFailed { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Return `true` if the process ran and exited unsuccessfully.
    pub fn is_execution_failure(&self) -> bool {
        matches!(self, Error::ExecutionFailed { .. })
    }
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// A specialized `Result` type for gitwrap operations.
pub type Result<T> = std::result::Result<T, Error>;

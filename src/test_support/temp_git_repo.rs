use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use crate::Repository;

pub(crate) const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "A U Thor"),
    ("GIT_AUTHOR_EMAIL", "author@example.com"),
    ("GIT_COMMITTER_NAME", "C O Mitter"),
    ("GIT_COMMITTER_EMAIL", "committer@example.com"),
];

/// A `TempGitRepo` creates a temporary repo using the command-line git
/// from the host system, independently of this crate. Tests use it to set
/// up fixtures that gitwrap then has to recognize and operate on.
///
/// Because this struct is intended for testing, its functions
/// panic instead of returning Result structs.
pub(crate) struct TempGitRepo {
    #[allow(dead_code)] // tempdir is only used for RAII
    tempdir: tempfile::TempDir,
    path: PathBuf,
}

impl TempGitRepo {
    // Create a new, empty working tree in a temporary directory.
    // This directory will be deleted when the struct is dropped.
    pub fn new() -> TempGitRepo {
        let mut r = TempGitRepo::empty();
        r.git_command(&["init"]);
        r
    }

    // Same, but `git init --bare`.
    pub fn new_bare() -> TempGitRepo {
        let mut r = TempGitRepo::empty();
        r.git_command(&["init", "--bare"]);
        r
    }

    // A working tree with a single commit adding `README`.
    pub fn with_commit() -> TempGitRepo {
        let mut r = TempGitRepo::new();
        r.commit_file("README", "hello\n", "Initial commit");
        r
    }

    fn empty() -> TempGitRepo {
        let tempdir = tempfile::tempdir().unwrap();
        let path = fs::canonicalize(tempdir.path()).unwrap();
        TempGitRepo { tempdir, path }
    }

    // Return the canonical path for this repo's root.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    // Write `content` to `name`, then add and commit it.
    pub fn commit_file(&mut self, name: &str, content: &str, message: &str) -> &mut TempGitRepo {
        fs::write(self.path.join(name), content).unwrap();
        self.git_command(&["add", name])
            .git_command(&["commit", "-m", message])
    }

    // Create a command struct pointing to the root of the repo.
    pub fn command<S: AsRef<OsStr>>(&self, program: S) -> Command {
        let mut c = Command::new(program);
        c.current_dir(&self.path);
        c.envs(IDENTITY.iter().copied());
        c
    }

    // Run a git command and return the git repo struct for method chaining.
    // Since this is used primarily for testing purposes, panics if command fails.
    pub fn git_command<I, S>(&mut self, args: I) -> &mut TempGitRepo
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.command("git").args(args).output().unwrap();

        if !output.status.success() {
            panic!(
                "git command failed with status {:?}\n\nstdout:\n\n{}\n\nstderr:\n\n{}\n\n",
                output.status.code(),
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        self
    }

    // Run a git command and return its trimmed stdout.
    pub fn git_output<I, S>(&self, args: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = self.command("git").args(args).output().unwrap();
        assert!(output.status.success(), "git command failed: {:?}", output);
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

// Give `repo` an author and committer so `commit` works on hosts without a
// global git identity.
pub(crate) fn set_identity(repo: &Repository) {
    for (key, value) in IDENTITY.iter() {
        repo.set_env(*key, *value);
    }
}

#[cfg(test)]
mod tests {
    use super::TempGitRepo;

    #[test]
    fn temp_path() {
        let path = {
            let mut r = TempGitRepo::new();
            r.git_command(&["status"]);

            let path = r.path().to_path_buf();
            assert!(path.join(".git").is_dir());

            path
        };

        assert!(!path.as_path().is_dir());
    }

    #[test]
    fn bare() {
        let r = TempGitRepo::new_bare();
        assert!(!r.path().join(".git").exists());
        assert!(r.path().join("config").is_file());
    }

    #[test]
    fn with_commit() {
        let r = TempGitRepo::with_commit();
        assert_eq!(r.git_output(&["log", "--pretty=format:%s"]), "Initial commit");
    }

    #[test]
    #[should_panic(expected = "git command failed with status")]
    fn git_command_error() {
        let mut r = TempGitRepo::new();
        r.git_command(&["bogus"]);
    }
}

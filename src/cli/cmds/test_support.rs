use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

use crate::App;

// A fresh repository created through the `init` subcommand.
pub(crate) fn init_repo() -> (TempDir, String) {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("repo");
    let path = path.to_str().unwrap().to_string();

    App::run_with_args(vec!["init", &path]).unwrap();
    (temp, path)
}

// Commits `name` with `content` using the host's git directly.
pub(crate) fn commit_file(dir: &str, name: &str, content: &str, message: &str) {
    fs::write(Path::new(dir).join(name), content).unwrap();
    git(dir, &["add", name]);
    git(dir, &["commit", "-q", "-m", message]);
}

pub(crate) fn git(dir: &str, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .env("GIT_AUTHOR_NAME", "A U Thor")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "C O Mitter")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed with {}", args, status);
}

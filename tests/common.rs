use std::{path::Path, process::Command};

use gitwrap::Repository;

pub const IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "A U Thor"),
    ("GIT_AUTHOR_EMAIL", "author@example.com"),
    ("GIT_COMMITTER_NAME", "C O Mitter"),
    ("GIT_COMMITTER_EMAIL", "committer@example.com"),
];

#[allow(dead_code)]
pub fn set_identity(repo: &Repository) {
    for (key, value) in IDENTITY.iter() {
        repo.set_env(*key, *value);
    }
}

// Run the host's git directly, bypassing the crate under test.
#[allow(dead_code)]
pub fn git<P: AsRef<Path>>(dir: P, args: &[&str]) -> String {
    let output = Command::new("git")
        .current_dir(dir)
        .args(args)
        .envs(IDENTITY.iter().copied())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

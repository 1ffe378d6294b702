use std::fs;

use super::super::*;

use crate::test_support::TempGitRepo;

#[test]
fn work_tree() {
    let tgr = TempGitRepo::new();
    let r = Repository::open(tgr.path()).unwrap();

    assert_eq!(r.root_path(), tgr.path());
    assert!(!r.is_bare());
    assert_eq!(r.git_dir().unwrap(), tgr.path().join(".git"));
}

#[test]
fn bare() {
    let tgr = TempGitRepo::new_bare();
    let r = Repository::open(tgr.path()).unwrap();

    assert_eq!(r.root_path(), tgr.path());
    assert!(r.is_bare());
    assert_eq!(r.git_dir().unwrap(), tgr.path());
}

#[test]
fn relative_segments_are_canonicalized() {
    let tgr = TempGitRepo::new();
    fs::create_dir(tgr.path().join("sub")).unwrap();

    let r = Repository::open(tgr.path().join("sub/..")).unwrap();
    assert_eq!(r.root_path(), tgr.path());
}

#[test]
fn separate_git_dir() {
    let temp = tempfile::tempdir().unwrap();
    let base = fs::canonicalize(temp.path()).unwrap();
    let work_dir = base.join("work");
    let meta_dir = base.join("meta.git");

    let tgr = TempGitRepo::new();
    let status = tgr
        .command("git")
        .arg("init")
        .arg(format!("--separate-git-dir={}", meta_dir.display()))
        .arg(&work_dir)
        .status()
        .unwrap();
    assert!(status.success());
    assert!(work_dir.join(".git").is_file());

    let r = Repository::open(&work_dir).unwrap();
    assert!(!r.is_bare());
    assert_eq!(
        fs::canonicalize(r.git_dir().unwrap()).unwrap(),
        fs::canonicalize(&meta_dir).unwrap()
    );

    // And git itself is happy to run there.
    r.status().unwrap();
}

#[test]
fn relative_gitfile() {
    let tgr = TempGitRepo::new_bare();

    let temp = tempfile::tempdir().unwrap();
    let work_dir = fs::canonicalize(temp.path()).unwrap().join("wt");
    fs::create_dir(&work_dir).unwrap();

    // Point at the bare repo through a relative path.
    let meta = tgr.path().to_path_buf();
    let rel = pathdiff(&work_dir, &meta);
    fs::write(work_dir.join(".git"), format!("gitdir: {}\n", rel)).unwrap();

    let r = Repository::open(&work_dir).unwrap();
    assert!(!r.is_bare());
    assert_eq!(fs::canonicalize(r.git_dir().unwrap()).unwrap(), meta);
}

#[test]
fn malformed_gitfile() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join(".git"), "pointer: nowhere\n").unwrap();

    let err = Repository::open(temp.path()).unwrap_err();
    if let Error::NotAGitRepository(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_not_found() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("nope");

    let err = Repository::open(&path).unwrap_err();
    if let Error::NotFound(err_path) = err {
        assert_eq!(err_path, path);
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_not_a_repo() {
    let temp = tempfile::tempdir().unwrap();

    for (allow_create, auto_init) in &[(false, false), (false, true)] {
        let err = RepositoryLocator::default()
            .resolve(temp.path(), *allow_create, *auto_init)
            .unwrap_err();

        if let Error::NotAGitRepository(err_path) = err {
            assert_eq!(err_path, fs::canonicalize(temp.path()).unwrap());
        } else {
            panic!("wrong error: {:?}", err);
        }
    }

    // Nothing was created.
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn error_config_not_bare() {
    // A `config` that says `bare = false` is not a bare repo, and without a
    // `.git` entry it is not a working tree either.
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("config"),
        "[core]\n\trepositoryformatversion = 0\n\tbare = false\n",
    )
    .unwrap();

    let err = Repository::open(temp.path()).unwrap_err();
    if let Error::NotAGitRepository(_) = err {
        // expected
    } else {
        panic!("wrong error: {:?}", err);
    }
}

#[test]
fn error_not_a_directory() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("file");
    fs::write(&file, "x").unwrap();

    for allow_create in &[false, true] {
        let err = RepositoryLocator::default()
            .resolve(&file, *allow_create, false)
            .unwrap_err();

        if let Error::NotADirectory(_) = err {
            // expected
        } else {
            panic!("wrong error: {:?}", err);
        }
    }
}

#[test]
fn error_already_exists() {
    let tgr = TempGitRepo::new();
    let bare = TempGitRepo::new_bare();

    for path in &[tgr.path(), bare.path()] {
        for auto_init in &[false, true] {
            let err = RepositoryLocator::default()
                .resolve(path, true, *auto_init)
                .unwrap_err();

            if let Error::AlreadyExists(err_path) = err {
                assert_eq!(err_path.as_path(), *path);
            } else {
                panic!("wrong error: {:?}", err);
            }
        }
    }
}

// Relative path from directory `from` to `to`. Both must be canonical.
fn pathdiff(from: &std::path::Path, to: &std::path::Path) -> String {
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();

    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for c in &to[common..] {
        parts.push(c.as_os_str().to_string_lossy().into_owned());
    }

    parts.join("/")
}

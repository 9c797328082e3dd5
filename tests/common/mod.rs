//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use git2::{Repository, RepositoryInitOptions, Signature};

use autocommit::GitCli;

/// Branch used by every test repository.
pub const BRANCH: &str = "main";

/// Message of the commit every test repository starts with.
pub const INITIAL_MESSAGE: &str = "chore: initial commit";

/// A working repository with a bare `origin` remote, both in temp directories.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub remote_dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one pushed commit containing `README.md`.
    pub fn new() -> Self {
        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        let mut remote_opts = RepositoryInitOptions::new();
        remote_opts.bare(true).initial_head(BRANCH);
        Repository::init_opts(remote_dir.path(), &remote_opts)
            .expect("Failed to init bare remote");

        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head(BRANCH);
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
            config.set_bool("commit.gpgsign", false).unwrap();
            config.set_bool("pull.rebase", false).unwrap();
        }

        repo.remote(
            "origin",
            remote_dir.path().to_str().expect("Invalid remote path"),
        )
        .expect("Failed to add origin remote");

        let test_repo = Self {
            dir,
            remote_dir,
            repo,
        };

        test_repo.write("README.md", "# test project\n");
        test_repo.commit_all(INITIAL_MESSAGE);
        test_repo.git(&["push", "origin", BRANCH]);

        test_repo
    }

    /// Write a file relative to the working directory, creating parent dirs.
    pub fn write(&self, path: &str, content: &str) {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(full, content).expect("Failed to write test file");
    }

    /// Commit every file in the working directory with git2.
    fn commit_all(&self, message: &str) {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit");
    }

    /// Run a git command in the working directory and assert it succeeds.
    pub fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed in test setup", args);
    }

    /// A [`GitCli`] syncing with `origin main`.
    pub fn git_cli(&self) -> GitCli {
        GitCli::new(
            self.dir.path(),
            Some("origin".to_string()),
            Some(BRANCH.to_string()),
        )
    }

    /// Message of the local HEAD commit, without the trailing newline.
    pub fn head_message(&self) -> String {
        commit_message(&self.repo, "HEAD")
    }

    /// Message of the remote branch tip, without the trailing newline.
    pub fn remote_head_message(&self) -> String {
        let remote = Repository::open_bare(self.remote_dir.path()).expect("Failed to open remote");
        commit_message(&remote, &format!("refs/heads/{}", BRANCH))
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn commit_message(repo: &Repository, spec: &str) -> String {
    repo.revparse_single(spec)
        .and_then(|obj| obj.peel_to_commit())
        .expect("Failed to resolve commit")
        .message()
        .unwrap_or("")
        .trim_end()
        .to_string()
}

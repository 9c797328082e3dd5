//! Git operations for the commit workflow.
//!
//! Fetch, pull, add, commit and push shell out to the system `git` binary,
//! inheriting the user's existing git config, SSH agent, and credential store.
//! Status and diff are read with git2.

use std::path::{Path, PathBuf};
use std::process::Command;

use git2::Repository;
use tracing::debug;

use crate::error::GitError;
use crate::git::VcsClient;
use crate::git::diff::collect_staged_diff;
use crate::git::status::{ChangedFile, collect_changed_files};

/// Remote used when a branch is configured without a remote.
const DEFAULT_REMOTE: &str = "origin";

/// [`VcsClient`] backed by the `git` binary and git2.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    remote: Option<String>,
    branch: Option<String>,
}

impl GitCli {
    /// Operate on the repository containing `workdir`.
    ///
    /// With no remote or branch, sync and push use the current branch's
    /// upstream, exactly like plain `git pull` and `git push`.
    pub fn new(workdir: impl Into<PathBuf>, remote: Option<String>, branch: Option<String>) -> Self {
        Self {
            workdir: workdir.into(),
            remote,
            branch,
        }
    }

    /// Arguments naming the sync target: `[]`, `[remote]` or `[remote, branch]`.
    fn target_args(&self) -> Vec<&str> {
        match (&self.remote, &self.branch) {
            (None, None) => Vec::new(),
            (Some(remote), None) => vec![remote.as_str()],
            (remote, Some(branch)) => vec![
                remote.as_deref().unwrap_or(DEFAULT_REMOTE),
                branch.as_str(),
            ],
        }
    }

    fn run_with_target(&self, command: &str) -> Result<(), GitError> {
        let mut args = vec![command];
        args.extend(self.target_args());
        run_git(&self.workdir, &args, command).map(|_| ())
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.workdir).map_err(GitError::OpenRepository)
    }
}

impl VcsClient for GitCli {
    fn fetch(&self) -> Result<(), GitError> {
        self.run_with_target("fetch")
    }

    fn pull(&self) -> Result<(), GitError> {
        self.run_with_target("pull")
    }

    fn changed_files(&self) -> Result<Vec<ChangedFile>, GitError> {
        collect_changed_files(&self.open()?)
    }

    fn stage_all(&self) -> Result<(), GitError> {
        run_git(&self.workdir, &["add", "-A"], "add").map(|_| ())
    }

    fn staged_diff(&self) -> Result<String, GitError> {
        collect_staged_diff(&self.open()?)
    }

    fn commit(&self, message: &str) -> Result<(), GitError> {
        run_git(&self.workdir, &["commit", "-m", message], "commit").map(|_| ())
    }

    fn push(&self) -> Result<(), GitError> {
        self.run_with_target("push")
    }
}

/// Run a git command in `workdir` and return its stdout.
fn run_git(workdir: &Path, args: &[&str], operation: &str) -> Result<String, GitError> {
    debug!("git {}", args.join(" "));

    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .map_err(|e| GitError::Spawn {
            operation: operation.to_string(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

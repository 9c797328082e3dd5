//! Version control operations: the `git` binary for network and write
//! operations, git2-rs for reading status and diffs.

pub mod cli;
pub mod diff;
pub mod status;

pub use cli::GitCli;
pub use diff::{MAX_DIFF_LENGTH, collect_staged_diff};
pub use status::{ChangedFile, FileStatus, collect_changed_files};

use crate::error::GitError;

/// The version control operations the commit workflow needs.
///
/// This abstraction allows substituting the repository in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VcsClient {
    fn fetch(&self) -> Result<(), GitError>;

    fn pull(&self) -> Result<(), GitError>;

    /// Changed, added, deleted and untracked files in repository order.
    fn changed_files(&self) -> Result<Vec<ChangedFile>, GitError>;

    /// Stage every working tree change, like `git add -A`.
    fn stage_all(&self) -> Result<(), GitError>;

    /// Unified diff of the index against HEAD, without color.
    fn staged_diff(&self) -> Result<String, GitError>;

    fn commit(&self, message: &str) -> Result<(), GitError>;

    fn push(&self) -> Result<(), GitError>;
}

//! Working tree status using git2.

use std::fmt;

use git2::{Repository, Status, StatusOptions};

use crate::error::GitError;

/// Status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    TypeChange,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Added => write!(f, "Added"),
            FileStatus::Modified => write!(f, "Modified"),
            FileStatus::Deleted => write!(f, "Deleted"),
            FileStatus::Renamed => write!(f, "Renamed"),
            FileStatus::TypeChange => write!(f, "TypeChange"),
        }
    }
}

/// A file with pending changes in the working tree or index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
    /// Repository-relative path; the new path for renames.
    pub path: String,
    pub status: FileStatus,
}

impl FileStatus {
    fn from_git2(status: Status) -> Option<Self> {
        if status.intersects(Status::INDEX_NEW | Status::WT_NEW) {
            Some(FileStatus::Added)
        } else if status.intersects(Status::INDEX_DELETED | Status::WT_DELETED) {
            Some(FileStatus::Deleted)
        } else if status.intersects(Status::INDEX_RENAMED | Status::WT_RENAMED) {
            Some(FileStatus::Renamed)
        } else if status.intersects(Status::INDEX_TYPECHANGE | Status::WT_TYPECHANGE) {
            Some(FileStatus::TypeChange)
        } else if status.intersects(Status::INDEX_MODIFIED | Status::WT_MODIFIED | Status::CONFLICTED)
        {
            Some(FileStatus::Modified)
        } else {
            None
        }
    }
}

/// List every pending change: staged, unstaged and untracked.
///
/// Ignored files are skipped. Untracked directories are expanded to the
/// files inside them so each path is a file.
pub fn collect_changed_files(repo: &Repository) -> Result<Vec<ChangedFile>, GitError> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false)
        .renames_head_to_index(true);

    let statuses = repo.statuses(Some(&mut opts)).map_err(GitError::Status)?;

    let mut files = Vec::new();
    for entry in statuses.iter() {
        let Some(status) = FileStatus::from_git2(entry.status()) else {
            continue;
        };

        let renamed_to = entry
            .head_to_index()
            .or_else(|| entry.index_to_workdir())
            .and_then(|delta| delta.new_file().path())
            .map(|p| p.to_string_lossy().to_string());

        let path = match status {
            FileStatus::Renamed => renamed_to,
            _ => Some(String::from_utf8_lossy(entry.path_bytes()).into_owned()),
        };

        if let Some(path) = path.filter(|p| !p.is_empty()) {
            files.push(ChangedFile { path, status });
        }
    }

    Ok(files)
}

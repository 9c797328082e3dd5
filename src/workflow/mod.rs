//! Commit workflow: sync, stage, derive the message, commit, push, re-sync.
//!
//! Every step after a failure is skipped and nothing is rolled back: a
//! failed commit leaves the changes staged, a failed push leaves the local
//! commit in place.

use tracing::debug;

use crate::assistant::Assistant;
use crate::commit::{CommitKind, CommitMessage, CommitRequest, ImpactRules, resolve_message};
use crate::error::WorkflowError;
use crate::git::VcsClient;

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The working tree was clean after syncing; nothing was committed.
    NoChanges,
    /// A commit was created and pushed.
    Committed { message: String },
}

/// The commit workflow over a repository and an optional assistant.
pub struct Workflow<'a, V: ?Sized, A: ?Sized> {
    vcs: &'a V,
    assistant: &'a A,
    rules: &'a ImpactRules,
}

impl<'a, V, A> Workflow<'a, V, A>
where
    V: VcsClient + ?Sized,
    A: Assistant + ?Sized,
{
    pub fn new(vcs: &'a V, assistant: &'a A, rules: &'a ImpactRules) -> Self {
        Self {
            vcs,
            assistant,
            rules,
        }
    }

    /// Run the workflow.
    ///
    /// Steps:
    /// 1. fetch + pull
    /// 2. read changed files; stop with [`WorkflowOutcome::NoChanges`] if none
    /// 3. stage everything
    /// 4. use the requested kind, or classify the changed paths
    /// 5. resolve the message text (explicit, AI, or file list)
    /// 6. commit `<type>: <text>`
    /// 7. push
    /// 8. fetch + pull
    pub async fn run(&self, request: &CommitRequest) -> Result<WorkflowOutcome, WorkflowError> {
        println!("[SYNC] Fetching and pulling...");
        self.sync()?;

        let changed = self.vcs.changed_files().map_err(WorkflowError::Status)?;
        if changed.is_empty() {
            println!("[DONE] No changes to commit");
            return Ok(WorkflowOutcome::NoChanges);
        }

        for file in &changed {
            debug!("{} ({})", file.path, file.status);
        }

        println!("[STAGE] Adding {} changed files...", changed.len());
        self.vcs.stage_all().map_err(WorkflowError::Stage)?;

        let paths: Vec<String> = changed.into_iter().map(|f| f.path).collect();

        let kind = match request.kind {
            Some(kind) => kind,
            None => {
                let category = self.rules.classify(&paths);
                debug!("Classified changes as {:?}", category);
                CommitKind::from(category)
            }
        };

        let text = resolve_message(request.message.as_deref(), &paths, self.assistant, || {
            self.vcs.staged_diff()
        })
        .await;

        let message = CommitMessage::new(kind, text).format();

        println!("[COMMIT] \"{}\"", message);
        self.vcs.commit(&message).map_err(WorkflowError::Commit)?;

        println!("[PUSH] Pushing...");
        self.vcs.push().map_err(WorkflowError::Push)?;

        println!("[SYNC] Fetching and pulling latest changes...");
        self.sync()?;

        println!("[DONE] Committed and pushed");
        Ok(WorkflowOutcome::Committed { message })
    }

    fn sync(&self) -> Result<(), WorkflowError> {
        self.vcs.fetch().map_err(WorkflowError::Sync)?;
        self.vcs.pull().map_err(WorkflowError::Sync)
    }
}

//! Commit type derivation and message resolution.

pub mod classify;
pub mod kind;
pub mod message;

pub use classify::{ImpactCategory, ImpactRules};
pub use kind::{CommitKind, CommitRequest, CommitType, MAJOR_KEYWORD};
pub use message::{CommitMessage, fallback_message, resolve_message};

//! Commit kinds: the explicit type allow-list and the conventional-commit label.

use std::fmt;

use crate::commit::classify::ImpactCategory;

/// Commit types accepted as an explicit first argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Fix,
    Feat,
    Chore,
    Docs,
    Style,
    Refactor,
    Test,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Fix => "fix",
            CommitType::Feat => "feat",
            CommitType::Chore => "chore",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Refactor => "refactor",
            CommitType::Test => "test",
        }
    }
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fix" => Ok(Self::Fix),
            "feat" => Ok(Self::Feat),
            "chore" => Ok(Self::Chore),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "test" => Ok(Self::Test),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

/// The type token a commit message is prefixed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// Breaking change, rendered as `feat!`.
    Breaking,
    Conventional(CommitType),
}

/// Keyword that selects [`CommitKind::Breaking`] on the command line.
pub const MAJOR_KEYWORD: &str = "major";

impl CommitKind {
    pub fn label(&self) -> &'static str {
        match self {
            CommitKind::Breaking => "feat!",
            CommitKind::Conventional(commit_type) => commit_type.as_str(),
        }
    }
}

impl fmt::Display for CommitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for CommitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(MAJOR_KEYWORD) {
            return Ok(CommitKind::Breaking);
        }
        s.parse::<CommitType>().map(CommitKind::Conventional)
    }
}

impl From<ImpactCategory> for CommitKind {
    fn from(category: ImpactCategory) -> Self {
        match category {
            ImpactCategory::Major => CommitKind::Breaking,
            ImpactCategory::Minor => CommitKind::Conventional(CommitType::Feat),
            ImpactCategory::Patch => CommitKind::Conventional(CommitType::Fix),
        }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRequest {
    /// Explicit kind; `None` means derive it from the changed files.
    pub kind: Option<CommitKind>,
    /// Explicit message; `None` when no words were given.
    pub message: Option<String>,
}

impl CommitRequest {
    /// Parse the positional words `[type] [message...]`.
    ///
    /// A first word outside the allow-list is not dropped: it stays the first
    /// word of the message and the kind is derived from the changed files.
    pub fn from_words(words: &[String]) -> Self {
        let (kind, rest) = match words.split_first() {
            Some((first, rest)) => match first.parse::<CommitKind>() {
                Ok(kind) => (Some(kind), rest),
                Err(_) => (None, words),
            },
            None => (None, words),
        };

        let message = rest.join(" ").trim().to_string();

        Self {
            kind,
            message: (!message.is_empty()).then_some(message),
        }
    }
}

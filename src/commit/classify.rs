//! Impact classification of a change set.

/// Semantic version impact of a set of changed files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImpactCategory {
    Patch,
    Minor,
    Major,
}

/// Path rules used to classify a change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpactRules {
    /// Any path under one of these prefixes is a major change.
    pub major_prefixes: Vec<String>,
    /// Top-level entry files; changing one is a major change.
    pub entry_files: Vec<String>,
    /// Integration files; changing one is a minor change.
    pub minor_files: Vec<String>,
}

impl Default for ImpactRules {
    fn default() -> Self {
        Self {
            major_prefixes: vec!["routes/".to_string(), "auth/".to_string()],
            entry_files: vec!["app.js".to_string()],
            minor_files: vec!["firebase.js".to_string()],
        }
    }
}

impl ImpactRules {
    /// Classify changed paths.
    ///
    /// - A path under a major prefix, or equal to an entry file = Major
    /// - Otherwise, any minor file present = Minor
    /// - Otherwise = Patch
    ///
    /// Depends only on which paths are present, not their order.
    pub fn classify(&self, paths: &[String]) -> ImpactCategory {
        if paths.iter().any(|path| self.is_major(path)) {
            return ImpactCategory::Major;
        }

        if paths.iter().any(|path| self.minor_files.contains(path)) {
            return ImpactCategory::Minor;
        }

        ImpactCategory::Patch
    }

    fn is_major(&self, path: &str) -> bool {
        self.major_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
            || self.entry_files.iter().any(|entry| entry == path)
    }
}

use fillgap_merge::MergeReport;
use serde::Serialize;

/// What happened to one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Gaps were filled. `saved` is `false` for a dry run.
    Merged {
        name: String,
        report: MergeReport,
        backup: Option<String>,
        saved: bool,
    },
    /// The target had no gaps the source could fill.
    Unchanged { name: String },
    /// The document was not present on both sides.
    Skipped { name: String, reason: String },
    /// Loading, merging or saving failed.
    Failed { name: String, error: String },
}

impl FileOutcome {
    /// The document this outcome refers to.
    pub fn name(&self) -> &str {
        match self {
            Self::Merged { name, .. }
            | Self::Unchanged { name }
            | Self::Skipped { name, .. }
            | Self::Failed { name, .. } => name,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcomes of a batch, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn merged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Merged { .. }))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(FileOutcome::is_failure)
    }

    /// Returns `true` if any document failed.
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(FileOutcome::is_failure)
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

use chrono::Local;
use fillgap_merge::merge_documents;
use fillgap_store::DocumentStore;
use tracing::{debug, info, warn};

use crate::error::{SdkError, SdkResult};
use crate::outcome::{BatchReport, FileOutcome};

/// Knobs for a reconcile run.
#[derive(Clone, Debug)]
pub struct ReconcileOptions {
    /// Merge and report, but write nothing.
    pub dry_run: bool,
    /// Take a timestamped backup of the target before overwriting it.
    pub backup: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: true,
        }
    }
}

/// Fills gaps in target documents from their source counterparts.
///
/// Both stores address documents by the same name: `warmups.json` in the
/// source store is merged into `warmups.json` in the target store.
pub struct Reconciler<S, T> {
    source: S,
    target: T,
    options: ReconcileOptions,
}

impl<S: DocumentStore, T: DocumentStore> Reconciler<S, T> {
    pub fn new(source: S, target: T, options: ReconcileOptions) -> Self {
        Self {
            source,
            target,
            options,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    /// Every document the source store holds.
    pub fn discover(&self) -> SdkResult<Vec<String>> {
        Ok(self.source.list()?)
    }

    /// Load, merge, back up and save a single document.
    pub fn reconcile(&self, name: &str) -> SdkResult<FileOutcome> {
        self.reconcile_as(name, name)
    }

    /// Like [`Self::reconcile`], for a pair whose names differ between the
    /// two stores. The outcome carries the target name.
    pub fn reconcile_as(&self, source_name: &str, name: &str) -> SdkResult<FileOutcome> {
        let source = self.source.load(source_name)?;
        let target = self.target.load(name)?;

        let (source, mut target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            (source, target) => {
                let reason = match (source.is_some(), target.is_some()) {
                    (false, false) => "missing from source and target",
                    (false, true) => "missing from source",
                    _ => "missing from target",
                };
                warn!(name, reason, "skipping document");
                return Ok(FileOutcome::Skipped {
                    name: name.to_string(),
                    reason: reason.to_string(),
                });
            }
        };

        let report = merge_documents(&source, &mut target).map_err(|source| SdkError::Merge {
            name: name.to_string(),
            source,
        })?;

        if report.is_empty() {
            debug!(name, "no gaps to fill");
            return Ok(FileOutcome::Unchanged {
                name: name.to_string(),
            });
        }

        for change in &report.changes {
            debug!(name, path = change.path(), "filled");
        }

        if self.options.dry_run {
            info!(
                name,
                filled = report.filled(),
                appended = report.appended(),
                "dry run, document not written"
            );
            return Ok(FileOutcome::Merged {
                name: name.to_string(),
                report,
                backup: None,
                saved: false,
            });
        }

        let backup = if self.options.backup {
            Some(self.target.backup(name, Local::now())?)
        } else {
            None
        };
        self.target.save(name, &target)?;

        info!(
            name,
            filled = report.filled(),
            appended = report.appended(),
            "document merged"
        );
        Ok(FileOutcome::Merged {
            name: name.to_string(),
            report,
            backup,
            saved: true,
        })
    }

    /// Reconcile each document in turn.
    ///
    /// A failing document is recorded as [`FileOutcome::Failed`] and the batch
    /// moves on to the next one.
    pub fn reconcile_all<I, N>(&self, names: I) -> BatchReport
    where
        I: IntoIterator<Item = N>,
        N: AsRef<str>,
    {
        let mut batch = BatchReport::new();
        for name in names {
            let name = name.as_ref();
            let outcome = self.reconcile(name).unwrap_or_else(|e| {
                warn!(name, error = %e, "document failed");
                FileOutcome::Failed {
                    name: name.to_string(),
                    error: e.to_string(),
                }
            });
            batch.outcomes.push(outcome);
        }
        batch
    }
}

//! Action trait definition.
//!
//! An action turns one locale file plus its input (the source locale, a
//! rename, format settings) into byte-range edits.

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;

use super::edit::{FileChange, FileEdits};
use crate::core::data::LocaleResource;

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of files processed.
    pub processed: usize,
    /// Number of files skipped because they could not be scanned.
    pub skipped: usize,
    /// Number of keys changed.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
    /// Per-file outcome, in file order.
    pub changes: Vec<FileChange>,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
        self.changes.extend(other.changes);
    }
}

impl From<FileChange> for ActionStats {
    fn from(change: FileChange) -> Self {
        Self {
            processed: 1,
            skipped: 0,
            changes_applied: change.keys.len(),
            files_modified: usize::from(change.modified),
            changes: vec![change],
        }
    }
}

/// Action trait - plans edits for one file and writes them.
///
/// # Example
///
/// ```ignore
/// let stats = RemoveExtraneous::run(&targets, source)?;
/// ```
pub trait Action<I: ?Sized + Sync> {
    /// Edits for `target`.
    ///
    /// This is the only method that must be implemented.
    fn plan(target: &LocaleResource, input: &I) -> Result<FileEdits>;

    /// Plan and write every target. Unscannable files are skipped.
    fn run(targets: &[&LocaleResource], input: &I) -> Result<ActionStats> {
        let results = targets
            .par_iter()
            .map(|target| {
                if let Some(err) = &target.scan_error {
                    eprintln!(
                        "{} skipping {}: {}",
                        "warning:".bold().yellow(),
                        target.display_path(),
                        err
                    );
                    return Ok(ActionStats {
                        skipped: 1,
                        ..Default::default()
                    });
                }
                let edits = Self::plan(target, input)?;
                Ok(ActionStats::from(edits.write(target)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut stats = ActionStats::default();
        for result in results {
            stats += result;
        }
        Ok(stats)
    }
}

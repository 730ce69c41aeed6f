//! Byte-range edits of resource files.
//!
//! Records carry exact spans, so every change is a range replacement on the
//! original text. All edits of a file are applied in one pass and the file is
//! written once.

use std::{fs, ops::Range, path::PathBuf};

use anyhow::{Context, Result, bail};

use crate::core::data::{LocaleResource, MessageRecord};

/// Replace `range` with `text`. An empty range inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub text: String,
}

impl Edit {
    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Self {
            range,
            text: String::new(),
        }
    }

    pub fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Apply `edits` to `contents`.
///
/// Edits at the same offset keep their order. Overlapping edits are an error.
pub fn apply_edits(contents: &str, edits: &[Edit]) -> Result<String> {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.range.start);

    let mut out = String::with_capacity(contents.len());
    let mut pos = 0;
    for edit in sorted {
        if edit.range.start < pos || edit.range.end > contents.len() {
            bail!(
                "Overlapping edits at byte {}..{}",
                edit.range.start,
                edit.range.end
            );
        }
        out.push_str(&contents[pos..edit.range.start]);
        out.push_str(&edit.text);
        pos = edit.range.end;
    }
    out.push_str(&contents[pos..]);
    Ok(out)
}

/// Planned changes to one locale file.
#[derive(Debug, Clone, Default)]
pub struct FileEdits {
    pub locale: String,
    pub path: PathBuf,
    pub edits: Vec<Edit>,
    /// Keys changed, in report order.
    pub keys: Vec<String>,
    /// Keys that could not be handled.
    pub skipped: Vec<String>,
}

impl FileEdits {
    pub fn new(resource: &LocaleResource) -> Self {
        Self {
            locale: resource.locale.clone(),
            path: resource.file_path.clone(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply to the resource's contents and write the file if anything changed.
    pub fn write(self, resource: &LocaleResource) -> Result<FileChange> {
        let updated = apply_edits(&resource.contents, &self.edits)
            .with_context(|| format!("Failed to edit {}", self.path.display()))?;
        let modified = updated != resource.contents;
        if modified {
            fs::write(&self.path, updated)
                .with_context(|| format!("Failed to write file: {}", self.path.display()))?;
        }
        Ok(FileChange {
            locale: self.locale,
            path: self.path,
            keys: self.keys,
            skipped: self.skipped,
            modified,
        })
    }
}

/// Outcome of writing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub locale: String,
    pub path: PathBuf,
    pub keys: Vec<String>,
    pub skipped: Vec<String>,
    pub modified: bool,
}

/// Key prefix of the object holding `record`, `""` at top level.
pub fn parent_prefix(record: &MessageRecord) -> &str {
    &record.key[..record.key.len() - record.local_key.len()]
}

/// Whether the trimmed line is a comment or comment continuation.
pub fn is_comment_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

//! SortRecords action.
//!
//! Sorts the records of every object by key. Blank lines split an object into
//! blocks: records are sorted inside their block, then blocks are ordered by
//! their first key. Comment lines directly above a record move with it.
//! Used by the `mfv sort` command.

use std::cmp::Ordering;

use anyhow::Result;
use indexmap::IndexMap;

use super::edit::{Edit, FileEdits, is_comment_line, parent_prefix};
use super::traits::Action;
use crate::core::data::{LocaleResource, MessageRecord};

/// Action to sort records by key.
pub struct SortRecords;

impl Action<()> for SortRecords {
    fn plan(target: &LocaleResource, _: &()) -> Result<FileEdits> {
        let mut file = FileEdits::new(target);
        let mut objects: IndexMap<&str, Vec<&MessageRecord>> = IndexMap::new();
        for record in target.messages.values() {
            objects.entry(parent_prefix(record)).or_default().push(record);
        }

        for (parent, records) in objects {
            let Some(sorted) = sort_object(&target.contents, &records) else {
                // Records sharing lines, or other entries in between.
                file.skipped.push(parent.trim_end_matches('.').to_string());
                continue;
            };
            if target.contents[sorted.edit.range.clone()] != sorted.edit.text {
                file.edits.push(sorted.edit);
                file.keys.extend(sorted.moved);
            }
        }
        Ok(file)
    }
}

/// Case-insensitive key order, ties broken by exact comparison.
pub fn compare_keys(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

struct SortedObject {
    edit: Edit,
    moved: Vec<String>,
}

struct Chunk<'a> {
    key: &'a str,
    /// Attached comments and the record line, without its comma.
    text: String,
    /// Where the comma goes back.
    body_end: usize,
}

fn sort_object(contents: &str, records: &[&MessageRecord]) -> Option<SortedObject> {
    let (first, last) = (records.first()?, records.last()?);
    if records
        .iter()
        .any(|r| !contents[r.line_span.clone()].ends_with('\n'))
    {
        return None;
    }

    let start = attached_comments_start(contents, first.line_span.start);
    let mut blocks: Vec<Vec<Chunk>> = Vec::new();
    let mut separators: Vec<&str> = Vec::new();
    let mut gap_start = start;

    for record in records {
        let gap = &contents[gap_start..record.line_span.start];
        if gap
            .lines()
            .any(|line| !line.trim().is_empty() && !is_comment_line(line))
        {
            return None;
        }
        let split = gap
            .split_inclusive('\n')
            .scan(0, |offset, line| {
                *offset += line.len();
                Some((*offset, line))
            })
            .filter(|(_, line)| line.trim().is_empty())
            .map(|(end, _)| end)
            .last()
            .unwrap_or(0);
        let (separator, attached) = gap.split_at(split);
        if blocks.is_empty() || !separator.is_empty() {
            if !blocks.is_empty() {
                separators.push(separator);
            }
            blocks.push(Vec::new());
        }

        let line_start = record.line_span.start;
        let mut line = contents[record.line_span.clone()].to_string();
        if let Some(comma) = record.comma {
            let rel = comma.checked_sub(line_start)?;
            if line.get(rel..rel + 1) != Some(",") {
                return None;
            }
            line.remove(rel);
        }
        let chunk = Chunk {
            key: &record.key,
            body_end: attached.len() + record.body_span.end - line_start,
            text: format!("{}{}", attached, line),
        };
        blocks.last_mut()?.push(chunk);
        gap_start = record.line_span.end;
    }

    for block in &mut blocks {
        block.sort_by(|a, b| compare_keys(a.key, b.key));
    }
    blocks.sort_by(|a, b| compare_keys(a[0].key, b[0].key));

    let total = records.len();
    let mut text = String::new();
    let mut order: Vec<&str> = Vec::with_capacity(total);
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 {
            text.push_str(separators[idx - 1]);
        }
        for chunk in block {
            order.push(chunk.key);
            let is_last = order.len() == total;
            if is_last && last.comma.is_none() {
                text.push_str(&chunk.text);
            } else {
                text.push_str(&chunk.text[..chunk.body_end]);
                text.push(',');
                text.push_str(&chunk.text[chunk.body_end..]);
            }
        }
    }

    let moved = records
        .iter()
        .zip(&order)
        .filter(|(record, key)| record.key != **key)
        .map(|(_, key)| key.to_string())
        .collect();
    Some(SortedObject {
        edit: Edit::replace(start..last.line_span.end, text),
        moved,
    })
}

/// Start of the comment lines directly above `start`.
fn attached_comments_start(contents: &str, mut start: usize) -> usize {
    while start > 0 {
        let line_start = contents[..start - 1].rfind('\n').map_or(0, |idx| idx + 1);
        if !is_comment_line(&contents[line_start..start]) {
            break;
        }
        start = line_start;
    }
    start
}

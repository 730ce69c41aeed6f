//! AddMissing action.
//!
//! Copies source records the target locale lacks, verbatim, next to their
//! source neighbours. Used by the `mfv add-missing` command.

use anyhow::Result;
use indexmap::IndexMap;

use super::edit::{Edit, FileEdits, parent_prefix};
use super::traits::Action;
use crate::core::data::{LocaleResource, MessageRecord};

const DEFAULT_INDENT: &str = "  ";

/// Action to add missing records. The input is the source locale.
pub struct AddMissing;

impl Action<LocaleResource> for AddMissing {
    fn plan(target: &LocaleResource, source: &LocaleResource) -> Result<FileEdits> {
        let mut file = FileEdits::new(target);
        let records: Vec<&MessageRecord> = source.messages.values().collect();
        let mut after: IndexMap<&str, Vec<&MessageRecord>> = IndexMap::new();
        let mut into_empty: Vec<&MessageRecord> = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            if target.contains_key(&record.key) {
                continue;
            }
            let parent = parent_prefix(record);
            let next = records[idx + 1..]
                .iter()
                .filter(|other| parent_prefix(other) == parent)
                .find_map(|other| target.get(&other.key));
            let previous = records[..idx]
                .iter()
                .rev()
                .filter(|other| parent_prefix(other) == parent)
                .find_map(|other| target.get(&other.key))
                .or_else(|| {
                    target
                        .messages
                        .values()
                        .filter(|other| parent_prefix(other) == parent)
                        .last()
                });

            let text = record.verbatim(&source.contents);
            if let Some(anchor) = next {
                file.edits.push(insert_before(target, anchor, text));
            } else if let Some(anchor) = previous {
                after.entry(anchor.key.as_str()).or_default().push(record);
            } else if parent.is_empty() && target.is_empty() {
                into_empty.push(record);
            } else {
                // The enclosing object does not exist in the target.
                file.skipped.push(record.key.clone());
                continue;
            }
            file.keys.push(record.key.clone());
        }

        for (anchor, added) in after {
            if let Some(anchor) = target.get(anchor) {
                let texts: Vec<&str> = added.iter().map(|r| r.verbatim(&source.contents)).collect();
                file.edits.extend(insert_after(target, anchor, &texts));
            }
        }

        if !into_empty.is_empty()
            && let Some(brace) = target.contents.rfind('}')
        {
            let indent = records
                .first()
                .map(|r| r.leading_whitespace.as_str())
                .filter(|indent| !indent.is_empty())
                .unwrap_or(DEFAULT_INDENT);
            let lines: Vec<String> = into_empty
                .iter()
                .map(|r| format!("{}{}", indent, r.verbatim(&source.contents)))
                .collect();
            let open = if target.contents[..brace].ends_with('\n') {
                ""
            } else {
                "\n"
            };
            file.edits
                .push(Edit::insert(brace, format!("{}{}\n", open, lines.join(",\n"))));
        }

        Ok(file)
    }
}

fn owns_line(target: &LocaleResource, record: &MessageRecord) -> bool {
    target.contents[record.line_span.clone()].ends_with('\n')
}

fn insert_before(target: &LocaleResource, anchor: &MessageRecord, text: &str) -> Edit {
    if owns_line(target, anchor) {
        Edit::insert(
            anchor.line_span.start,
            format!("{}{},\n", anchor.leading_whitespace, text),
        )
    } else {
        Edit::insert(anchor.key_span.start, format!("{}, ", text))
    }
}

fn insert_after(target: &LocaleResource, anchor: &MessageRecord, texts: &[&str]) -> Vec<Edit> {
    let mut edits = Vec::new();
    if owns_line(target, anchor) {
        if anchor.comma.is_none() {
            edits.push(Edit::insert(anchor.body_span.end, ","));
        }
        let lines: Vec<String> = texts
            .iter()
            .map(|text| format!("{}{}", anchor.leading_whitespace, text))
            .collect();
        let trailing = if anchor.has_comma() { "," } else { "" };
        edits.push(Edit::insert(
            anchor.line_span.end,
            format!("{}{}\n", lines.join(",\n"), trailing),
        ));
    } else {
        match anchor.comma {
            Some(comma) => {
                let text: String = texts.iter().map(|text| format!(" {},", text)).collect();
                edits.push(Edit::insert(comma + 1, text));
            }
            None => {
                let text: String = texts.iter().map(|text| format!(", {}", text)).collect();
                edits.push(Edit::insert(anchor.body_span.end, text));
            }
        }
    }
    edits
}

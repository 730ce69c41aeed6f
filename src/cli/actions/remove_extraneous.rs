//! RemoveExtraneous action.
//!
//! Deletes records whose key does not exist in the source locale.
//! Used by the `mfv remove-extraneous` command.

use std::collections::HashSet;

use anyhow::Result;

use super::edit::{Edit, FileEdits};
use super::traits::Action;
use crate::core::data::{LocaleResource, MessageRecord};

/// Action to delete extraneous records. The input is the source locale.
pub struct RemoveExtraneous;

impl Action<LocaleResource> for RemoveExtraneous {
    fn plan(target: &LocaleResource, source: &LocaleResource) -> Result<FileEdits> {
        let mut file = FileEdits::new(target);
        let removed: HashSet<&str> = target
            .keys()
            .filter(|key| !source.contains_key(key))
            .map(String::as_str)
            .collect();
        if removed.is_empty() {
            return Ok(file);
        }

        let records: Vec<&MessageRecord> = target.messages.values().collect();
        for (idx, record) in records.iter().enumerate() {
            if !removed.contains(record.key.as_str()) {
                continue;
            }
            file.edits.push(Edit::delete(record.line_span.clone()));
            file.keys.push(record.key.clone());

            // The last entry of an object goes; the new last one must not
            // keep a comma the file style does not use.
            if record.comma.is_none()
                && let Some(edit) = dangling_comma(&target.contents, &records[..idx], &removed, record)
            {
                file.edits.push(edit);
            }
        }
        Ok(file)
    }
}

/// Comma that ends the last surviving entry before `record`.
fn dangling_comma(
    contents: &str,
    before: &[&MessageRecord],
    removed: &HashSet<&str>,
    record: &MessageRecord,
) -> Option<Edit> {
    let mut end = record.line_span.start;
    loop {
        let head = contents[..end].trim_end();
        let owner = before
            .iter()
            .rev()
            .find(|other| other.line_span.start < head.len() && head.len() <= other.line_span.end);
        match owner {
            Some(other) if removed.contains(other.key.as_str()) => end = other.line_span.start,
            Some(other) => return other.comma.map(|comma| Edit::delete(comma..comma + 1)),
            // Nested object or opening brace.
            None => {
                return head
                    .ends_with(',')
                    .then(|| Edit::delete(head.len() - 1..head.len()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::{edit::apply_edits, test_resource};
    use pretty_assertions::assert_eq;

    fn remove(source: &str, target: &str) -> (String, Vec<String>) {
        let source = test_resource("en", source);
        let target = test_resource("fr", target);
        let file = RemoveExtraneous::plan(&target, &source).unwrap();
        (apply_edits(&target.contents, &file.edits).unwrap(), file.keys)
    }

    #[test]
    fn test_remove_middle_record() {
        let (out, keys) = remove(
            "{\n  \"a\": \"A\",\n  \"c\": \"C\"\n}\n",
            "{\n  \"a\": \"Ah\",\n  \"b\": \"Beh\",\n  \"c\": \"Ceh\"\n}\n",
        );
        assert_eq!(out, "{\n  \"a\": \"Ah\",\n  \"c\": \"Ceh\"\n}\n");
        assert_eq!(keys, vec!["b"]);
    }

    #[test]
    fn test_remove_last_record_drops_previous_comma() {
        let (out, _) = remove(
            "{\n  \"a\": \"A\"\n}\n",
            "{\n  \"a\": \"Ah\", // kept\n  \"b\": \"Beh\",\n  \"c\": \"Ceh\"\n}\n",
        );
        assert_eq!(out, "{\n  \"a\": \"Ah\" // kept\n}\n");
    }

    #[test]
    fn test_trailing_comma_style_is_kept() {
        let (out, _) = remove(
            "export default {\n\ta: 'A',\n};\n",
            "export default {\n\ta: 'Ah',\n\tb: 'Beh',\n};\n",
        );
        assert_eq!(out, "export default {\n\ta: 'Ah',\n};\n");
    }

    #[test]
    fn test_remove_nested_record() {
        let (out, keys) = remove(
            "{\n  \"nav\": {\n    \"home\": \"Home\"\n  }\n}\n",
            "{\n  \"nav\": {\n    \"home\": \"Accueil\",\n    \"old\": \"Vieux\"\n  }\n}\n",
        );
        assert_eq!(out, "{\n  \"nav\": {\n    \"home\": \"Accueil\"\n  }\n}\n");
        assert_eq!(keys, vec!["nav.old"]);
    }

    #[test]
    fn test_nothing_to_remove() {
        let (out, keys) = remove("{\"a\": \"A\"}", "{\"a\": \"Ah\"}");
        assert_eq!(out, "{\"a\": \"Ah\"}");
        assert!(keys.is_empty());
    }
}

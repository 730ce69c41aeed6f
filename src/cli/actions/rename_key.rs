//! RenameKey action.
//!
//! Rewrites one record key in place, keeping its quote style.
//! Used by the `mfv rename` command.

use anyhow::{Result, bail};

use super::edit::{Edit, FileEdits, parent_prefix};
use super::traits::Action;
use crate::core::data::{LocaleResource, QuoteChar};
use crate::core::parsers::escape::escape;

#[derive(Debug, Clone)]
pub struct KeyRename {
    pub old_key: String,
    pub new_key: String,
}

/// Action to rename a key. A file without the key reports it as skipped.
pub struct RenameKey;

impl Action<KeyRename> for RenameKey {
    fn plan(target: &LocaleResource, rename: &KeyRename) -> Result<FileEdits> {
        let mut file = FileEdits::new(target);
        let Some(record) = target.get(&rename.old_key) else {
            file.skipped.push(rename.old_key.clone());
            return Ok(file);
        };
        if target.contains_key(&rename.new_key) {
            bail!(
                "\"{}\" already exists in {}",
                rename.new_key,
                target.display_path()
            );
        }

        let parent = parent_prefix(record);
        let local = match rename.new_key.strip_prefix(parent) {
            Some(local) if !local.is_empty() && !local.contains('.') => local,
            _ => bail!(
                "Cannot rename \"{}\" to \"{}\": only the last key segment can change.",
                rename.old_key,
                rename.new_key
            ),
        };

        let quote = match record.key_quote {
            QuoteChar::Bare if !is_identifier(local) => QuoteChar::Double,
            quote => quote,
        };
        file.edits.push(Edit::replace(
            record.key_span.clone(),
            format!("{}{}{}", quote, escape(local, quote), quote),
        ));
        file.keys.push(rename.new_key.clone());
        Ok(file)
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::{edit::apply_edits, test_resource};
    use pretty_assertions::assert_eq;

    fn rename(text: &str, old_key: &str, new_key: &str) -> Result<(String, FileEdits)> {
        let target = test_resource("fr", text);
        let file = RenameKey::plan(
            &target,
            &KeyRename {
                old_key: old_key.to_string(),
                new_key: new_key.to_string(),
            },
        )?;
        Ok((apply_edits(&target.contents, &file.edits)?, file))
    }

    #[test]
    fn test_rename_keeps_quote_style() {
        let (out, file) = rename("{\n  'a': \"A\",\n  b: 'B'\n}", "a", "renamed").unwrap();
        assert_eq!(out, "{\n  'renamed': \"A\",\n  b: 'B'\n}");
        assert_eq!(file.keys, vec!["renamed"]);

        let (out, _) = rename("{\n  'a': \"A\",\n  b: 'B'\n}", "b", "with space").unwrap();
        assert_eq!(out, "{\n  'a': \"A\",\n  \"with space\": 'B'\n}");
    }

    #[test]
    fn test_rename_nested_key() {
        let (out, _) = rename("{\"nav\": {\"home\": \"Home\"}}", "nav.home", "nav.start").unwrap();
        assert_eq!(out, "{\"nav\": {\"start\": \"Home\"}}");
        assert!(rename("{\"nav\": {\"home\": \"Home\"}}", "nav.home", "start").is_err());
    }

    #[test]
    fn test_missing_key_is_skipped() {
        let (out, file) = rename("{\"a\": \"A\"}", "zzz", "b").unwrap();
        assert_eq!(out, "{\"a\": \"A\"}");
        assert_eq!(file.skipped, vec!["zzz"]);
    }

    #[test]
    fn test_existing_target_key_is_an_error() {
        assert!(rename("{\"a\": \"A\", \"b\": \"B\"}", "a", "b").is_err());
    }
}

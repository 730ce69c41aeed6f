//! FormatMessages action.
//!
//! Rewrites every message to its canonical form. Used by the `mfv format`
//! command.

use std::path::Path;

use anyhow::Result;

use super::edit::{Edit, FileEdits};
use super::traits::Action;
use crate::cli::args::FormatArgs;
use crate::core::data::{LocaleResource, MessageRecord, QuoteChar};
use crate::core::format::{FormatOptions, format_message};
use crate::core::parsers::escape::escape;

/// Format settings plus the source locale for argument correction.
pub struct FormatRequest<'a> {
    pub args: &'a FormatArgs,
    pub source: Option<&'a LocaleResource>,
}

/// Action to format messages.
pub struct FormatMessages;

impl Action<FormatRequest<'_>> for FormatMessages {
    fn plan(target: &LocaleResource, request: &FormatRequest<'_>) -> Result<FileEdits> {
        let mut file = FileEdits::new(target);
        let args = request.args;
        let template_literals = supports_template_literals(&target.file_path);

        for record in target.messages.values() {
            let source = request
                .source
                .filter(|_| args.correct)
                .and_then(|source| source.get(&record.key))
                .map(|source| source.value.as_str());
            let options = FormatOptions {
                locale: &target.locale,
                key: Some(&record.key),
                newlines: args.newlines,
                add: args.add,
                remove: args.remove,
                dedupe: args.dedupe,
                trim: args.trim,
                hoist: args.no_hoist.then_some(false),
                quotes: args.quotes,
                expand_hashes: true,
                rename_categories: !args.no_rename_categories,
                source,
                base_level: base_level(record, args.newlines),
            };

            let formatted = format_message(&record.value, &options);
            if formatted == record.value {
                continue;
            }
            file.edits
                .push(rewrite_value(record, &formatted, template_literals));
            file.keys.push(record.key.clone());
        }
        Ok(file)
    }
}

/// Tabs before nested lines of a multi-line message.
fn base_level(record: &MessageRecord, newlines: bool) -> usize {
    let tabs = record
        .leading_whitespace
        .chars()
        .filter(|c| *c == '\t')
        .count();
    if newlines || record.value.contains('\n') {
        tabs + 1
    } else {
        tabs
    }
}

/// JavaScript sources can hold multi-line messages in backtick strings.
fn supports_template_literals(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("js" | "cjs" | "mjs" | "ts")
    )
}

fn rewrite_value(record: &MessageRecord, value: &str, template_literals: bool) -> Edit {
    let quote = if template_literals && value.contains('\n') {
        QuoteChar::Backtick
    } else {
        record.value_quote
    };
    let raw = escape(value, quote);
    if quote == record.value_quote {
        Edit::replace(record.value_span.clone(), raw)
    } else {
        let quoted = record.value_span.start - 1..record.value_span.end + 1;
        Edit::replace(quoted, format!("{}{}{}", quote, raw, quote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::actions::{edit::apply_edits, test_resource, test_resource_file};
    use crate::core::format::QuoteMode;
    use pretty_assertions::assert_eq;

    fn format(target: &LocaleResource, args: &FormatArgs) -> (String, FileEdits) {
        let request = FormatRequest { args, source: None };
        let file = FormatMessages::plan(target, &request).unwrap();
        (apply_edits(&target.contents, &file.edits).unwrap(), file)
    }

    #[test]
    fn test_quotes_are_localized_in_place() {
        let target = test_resource("en", "{\n  \"a\": \"This isn't \\\"correct\\\"\",\n  \"b\": \"Fine\"\n}\n");
        let args = FormatArgs {
            quotes: Some(QuoteMode::Straight),
            ..Default::default()
        };
        let (out, file) = format(&target, &args);
        assert_eq!(out, "{\n  \"a\": \"This isn’t “correct”\",\n  \"b\": \"Fine\"\n}\n");
        assert_eq!(file.keys, vec!["a"]);
    }

    #[test]
    fn test_multi_line_output_uses_backticks_in_javascript() {
        let text = "export default {\n\ta: '{a, plural, one {{b, selectordinal, one {} other {}}}}',\n};\n";
        let args = FormatArgs {
            newlines: true,
            ..Default::default()
        };
        let (out, _) = format(&test_resource_file("en.js", text), &args);
        assert!(out.starts_with("export default {\n\ta: `{a, plural,\n"));
        assert!(out.ends_with("}`,\n};\n"));

        let (out, _) = format(&test_resource_file("en.json", text), &args);
        assert!(out.starts_with("export default {\n\ta: '{a, plural,\\n"));
    }

    #[test]
    fn test_argument_names_follow_source() {
        let source = test_resource("en", "{\"a\": \"Hello {name}\"}");
        let target = test_resource("fr", "{\"a\": \"Bonjour {Name}\"}");
        let args = FormatArgs {
            correct: true,
            ..Default::default()
        };
        let request = FormatRequest {
            args: &args,
            source: Some(&source),
        };
        let file = FormatMessages::plan(&target, &request).unwrap();
        let out = apply_edits(&target.contents, &file.edits).unwrap();
        assert_eq!(out, "{\"a\": \"Bonjour {name}\"}");
    }

    #[test]
    fn test_base_level() {
        let target = test_resource_file("en.js", "{\n\t\ta: 'x\\ny'\n}");
        let record = &target.messages["a"];
        assert_eq!(base_level(record, false), 3);
        let target = test_resource("en", "{\n  \"a\": \"x\"\n}");
        assert_eq!(base_level(&target.messages["a"], false), 0);
        assert_eq!(base_level(&target.messages["a"], true), 1);
    }
}

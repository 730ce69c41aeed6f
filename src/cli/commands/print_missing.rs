use anyhow::Result;
use serde_json::{Map, Value};

use super::helper::finish;
use super::{CommandKind, CommandResult, CommandSummary, PrintMissingSummary};
use crate::{
    cli::args::CommonArgs, core::ProjectContext, issues::IssueType, issues::Totals,
    rules::validate_locales,
};

/// Collect the source text of every missing or untranslated message, so it
/// can be handed to translators. `ignore` does not apply here.
pub fn print_missing(common: &CommonArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let mut summary = PrintMissingSummary::default();

    for dir in &ctx.dirs {
        for report in validate_locales(&dir.resources, &dir.validate_options())? {
            if !dir.is_target(&report.locale)
                || report.locale.eq_ignore_ascii_case(&dir.config.source_locale)
            {
                continue;
            }
            let messages: Map<String, Value> = report
                .issues
                .into_iter()
                .filter(|issue| {
                    matches!(
                        issue.issue_type,
                        IssueType::Missing | IssueType::Untranslated
                    )
                })
                .filter_map(|issue| Some((issue.key?, Value::String(issue.source?))))
                .collect();
            summary.files.insert(report.file, Value::Object(messages));
        }
    }

    Ok(finish(
        CommandKind::PrintMissing,
        CommandSummary::PrintMissing(summary),
        Totals::default(),
        false,
    ))
}

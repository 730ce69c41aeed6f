use anyhow::Result;

use super::{
    CommandKind, CommandResult, CommandSummary, EditSummary, LocaleOutcome, ValidateSummary,
};
use crate::cli::actions::ActionStats;
use crate::core::{LocaleDir, ProjectContext, data::LocaleResource};
use crate::issues::Totals;
use crate::rules::validate_locales;

pub fn finish(
    kind: CommandKind,
    summary: CommandSummary,
    totals: Totals,
    exit_on_errors: bool,
) -> CommandResult {
    CommandResult {
        kind,
        summary,
        totals,
        exit_on_errors,
    }
}

/// Validate every locale directory, applying each directory's `ignore`.
pub fn validate_dirs(ctx: &ProjectContext) -> Result<ValidateSummary> {
    let mut summary = ValidateSummary::default();
    for dir in &ctx.dirs {
        let ignored = dir.ignored_types();
        for report in validate_locales(&dir.resources, &dir.validate_options())? {
            if !dir.is_target(&report.locale) {
                continue;
            }
            if let Some(resource) = dir.resources.get(&report.locale) {
                summary
                    .locales
                    .push(LocaleOutcome::new(report, &ignored, resource));
            }
        }
        summary.dirs.push(dir.dir.clone());
    }
    Ok(summary)
}

pub fn totals_of(summary: &ValidateSummary) -> Totals {
    let mut totals = Totals::default();
    for outcome in &summary.locales {
        totals += outcome.totals.clone();
    }
    totals
}

/// Run an action over the target files of every directory.
///
/// The source locale is rewritten only when `include_source` is set.
pub fn edit_dirs<F>(ctx: &ProjectContext, include_source: bool, mut run: F) -> Result<EditSummary>
where
    F: FnMut(&LocaleDir, &[&LocaleResource]) -> Result<ActionStats>,
{
    let mut summary = EditSummary {
        locales: Vec::new(),
        stats: ActionStats::default(),
    };
    for dir in &ctx.dirs {
        let targets: Vec<&LocaleResource> = dir
            .targets()
            .filter(|target| {
                include_source || !target.locale.eq_ignore_ascii_case(&dir.config.source_locale)
            })
            .collect();
        for target in &targets {
            if !summary.locales.contains(&target.locale) {
                summary.locales.push(target.locale.clone());
            }
        }
        summary.stats += run(dir, &targets)?;
    }
    Ok(summary)
}

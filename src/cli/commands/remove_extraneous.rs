use anyhow::{Result, bail};

use super::helper::{edit_dirs, finish};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::actions::{Action, RemoveExtraneous},
    cli::args::CommonArgs,
    core::ProjectContext,
    issues::Totals,
};

pub fn remove_extraneous(common: &CommonArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let summary = edit_dirs(&ctx, false, |dir, targets| {
        let source = dir.require_source()?;
        // An unscannable source has no keys.
        if let Some(err) = &source.scan_error {
            bail!("Cannot read source locale {}: {}", source.display_path(), err);
        }
        RemoveExtraneous::run(targets, source)
    })?;

    Ok(finish(
        CommandKind::RemoveExtraneous,
        CommandSummary::Edit(summary),
        Totals::default(),
        false,
    ))
}

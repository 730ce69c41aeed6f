use anyhow::Result;

use super::helper::{edit_dirs, finish};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::actions::{Action, SortRecords},
    cli::args::CommonArgs,
    core::ProjectContext,
    issues::Totals,
};

pub fn sort(common: &CommonArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let summary = edit_dirs(&ctx, true, |_, targets| SortRecords::run(targets, &()))?;

    Ok(finish(
        CommandKind::Sort,
        CommandSummary::Edit(summary),
        Totals::default(),
        false,
    ))
}

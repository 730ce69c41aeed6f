use anyhow::Result;

use super::helper::{edit_dirs, finish};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::actions::{Action, AddMissing},
    cli::args::CommonArgs,
    core::ProjectContext,
    issues::Totals,
};

pub fn add_missing(common: &CommonArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let summary = edit_dirs(&ctx, false, |dir, targets| {
        AddMissing::run(targets, dir.require_source()?)
    })?;

    Ok(finish(
        CommandKind::AddMissing,
        CommandSummary::Edit(summary),
        Totals::default(),
        false,
    ))
}

use anyhow::Result;

use super::helper::{edit_dirs, finish};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::actions::{Action, FormatMessages, FormatRequest},
    cli::args::{CommonArgs, FormatArgs},
    core::ProjectContext,
    issues::Totals,
};

pub fn format(common: &CommonArgs, args: &FormatArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let summary = edit_dirs(&ctx, true, |dir, targets| {
        let request = FormatRequest {
            args,
            source: dir.source(),
        };
        FormatMessages::run(targets, &request)
    })?;

    Ok(finish(
        CommandKind::Format,
        CommandSummary::Edit(summary),
        Totals::default(),
        false,
    ))
}

use anyhow::Result;

use super::helper::{finish, totals_of, validate_dirs};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{cli::args::CommonArgs, core::ProjectContext};

pub fn validate(common: &CommonArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let summary = validate_dirs(&ctx)?;
    let totals = totals_of(&summary);

    Ok(finish(
        CommandKind::Validate,
        CommandSummary::Validate(summary),
        totals,
        true,
    ))
}

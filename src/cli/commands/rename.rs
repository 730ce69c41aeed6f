use anyhow::{Result, bail};

use super::helper::{edit_dirs, finish};
use super::{CommandKind, CommandResult, CommandSummary};
use crate::{
    cli::actions::{Action, KeyRename, RenameKey},
    cli::args::{CommonArgs, RenameArgs},
    core::ProjectContext,
    issues::Totals,
};

pub fn rename(common: &CommonArgs, args: &RenameArgs) -> Result<CommandResult> {
    let rename = KeyRename {
        old_key: args.old_key.trim().to_string(),
        new_key: args.new_key.trim().to_string(),
    };
    if rename.old_key.is_empty() || rename.new_key.is_empty() {
        bail!("Both the old and the new key are required.");
    }

    let ctx = ProjectContext::new(common)?;
    let summary = edit_dirs(&ctx, true, |_, targets| RenameKey::run(targets, &rename))?;

    Ok(finish(
        CommandKind::Rename,
        CommandSummary::Edit(summary),
        Totals::default(),
        false,
    ))
}

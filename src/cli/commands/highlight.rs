use anyhow::Result;

use super::helper::finish;
use super::{CommandKind, CommandResult, CommandSummary, HighlightSummary, HighlightedMessage};
use crate::{
    cli::args::{CommonArgs, HighlightArgs},
    core::{ProjectContext, structure::structure_spans},
    issues::Totals,
};

pub fn highlight(common: &CommonArgs, args: &HighlightArgs) -> Result<CommandResult> {
    let ctx = ProjectContext::new(common)?;
    let mut messages = Vec::new();
    for dir in &ctx.dirs {
        for target in dir.targets() {
            let value = target.get(&args.key).map(|record| record.value.clone());
            let structure = value.as_deref().map(structure_spans).unwrap_or_default();
            messages.push(HighlightedMessage {
                file: target.display_path(),
                value,
                structure,
            });
        }
    }

    Ok(finish(
        CommandKind::Highlight,
        CommandSummary::Highlight(HighlightSummary {
            key: args.key.clone(),
            messages,
        }),
        Totals::default(),
        false,
    ))
}

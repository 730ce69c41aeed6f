//! Advisory checks about how a message is structured.

use crate::{
    core::{case_map::CaseMap, icu::Node},
    issues::IssueType,
    rules::reporter::{KeyContext, Position, Reporter},
};

/// Plurals should nest inside selects, not the other way around.
pub fn check_nest_ideal(target: &CaseMap, ctx: &KeyContext<'_>, reporter: &mut Reporter<'_>) {
    if target.plural_before_select() {
        reporter.warning(
            IssueType::NestIdeal,
            ctx,
            "\"plural\" and \"selectordinal\" should always nest inside \"select\".",
            Position::Message(0),
        );
    }
}

/// A source message should be one selector wrapping complete sentences.
///
/// Only reported when a locale is validated against itself.
pub fn check_split(nodes: &[Node], ctx: &KeyContext<'_>, reporter: &mut Reporter<'_>) {
    if nodes.len() > 1 && nodes.iter().any(Node::is_selector) {
        reporter.warning(
            IssueType::Split,
            ctx,
            "String split by non-argument (e.g. select; plural).",
            Position::Record,
        );
    }
}

//! Correcting argument names against the source message.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::core::icu::{Node, Options, SelectOption, parse};

static ARG_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{<]([^,{}<>]+)[}>,]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgKind {
    Simple,
    Number,
    Date,
    Time,
    Select,
    Plural,
    Tag,
    /// Source did not parse; the kind is not known.
    Unknown,
}

fn kind_of(node: &Node) -> Option<(&str, ArgKind)> {
    let kind = match node {
        Node::Argument(_) => ArgKind::Simple,
        Node::Number(_) => ArgKind::Number,
        Node::Date(_) => ArgKind::Date,
        Node::Time(_) => ArgKind::Time,
        Node::Select(_) => ArgKind::Select,
        Node::Plural(_) => ArgKind::Plural,
        Node::Tag(_) => ArgKind::Tag,
        Node::Literal(_) | Node::Pound(_) => return None,
    };
    node.arg_name().map(|name| (name, kind))
}

fn collect(nodes: &[Node], out: &mut IndexMap<String, ArgKind>) {
    for node in nodes {
        if let Some((name, kind)) = kind_of(node) {
            out.entry(name.to_string()).or_insert(kind);
        }
        match node {
            Node::Select(select) => select.options.values().for_each(|o| collect(&o.value, out)),
            Node::Plural(plural) => plural.options.values().for_each(|o| collect(&o.value, out)),
            Node::Tag(tag) => collect(&tag.children, out),
            _ => {}
        }
    }
}

/// Argument names of a source message, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct ArgCatalog {
    names: IndexMap<String, ArgKind>,
}

impl ArgCatalog {
    pub fn from_source(source: &str) -> Self {
        let mut names = IndexMap::new();
        match parse(source) {
            Ok(nodes) => collect(&nodes, &mut names),
            Err(_) => {
                for caps in ARG_NAME_RE.captures_iter(source) {
                    let name = caps[1].trim();
                    if !name.is_empty() && !name.starts_with('/') {
                        names.entry(name.to_string()).or_insert(ArgKind::Unknown);
                    }
                }
            }
        }
        Self { names }
    }

    /// Rename target arguments that are missing from the source.
    ///
    /// A unique case-insensitive match wins. Otherwise the unclaimed source
    /// arguments of the same kind are used: one becomes the new name, several
    /// are joined with `|` for a human to pick from.
    pub fn normalize(&self, nodes: Vec<Node>) -> Vec<Node> {
        let mut used = IndexMap::new();
        collect(&nodes, &mut used);

        let mut renames: HashMap<String, String> = HashMap::new();
        let mut claimed: HashSet<&str> = HashSet::new();
        let mut unresolved = Vec::new();

        for (name, kind) in &used {
            if self.names.contains_key(name) {
                claimed.insert(name.as_str());
                continue;
            }
            let lower = name.to_lowercase();
            let matches: Vec<&String> = self
                .names
                .keys()
                .filter(|source| source.to_lowercase() == lower)
                .collect();
            if let [source] = matches.as_slice() {
                claimed.insert(source.as_str());
                renames.insert(name.clone(), (*source).clone());
            } else {
                unresolved.push((name, *kind));
            }
        }

        for (name, kind) in unresolved {
            let candidates: Vec<&str> = self
                .names
                .iter()
                .filter(|(source, source_kind)| {
                    (**source_kind == kind || **source_kind == ArgKind::Unknown)
                        && !claimed.contains(source.as_str())
                })
                .map(|(source, _)| source.as_str())
                .collect();
            if !candidates.is_empty() {
                renames.insert(name.clone(), candidates.join("|"));
            }
        }

        if renames.is_empty() {
            return nodes;
        }
        rename(nodes, &renames)
    }
}

fn rename_options(options: Options, renames: &HashMap<String, String>) -> Options {
    options
        .into_iter()
        .map(|(key, option)| {
            (
                key,
                SelectOption {
                    value: rename(option.value, renames),
                    key_span: option.key_span,
                },
            )
        })
        .collect()
}

fn rename(nodes: Vec<Node>, renames: &HashMap<String, String>) -> Vec<Node> {
    let apply = |name: &mut String| {
        if let Some(new_name) = renames.get(name.as_str()) {
            *name = new_name.clone();
        }
    };
    nodes
        .into_iter()
        .map(|node| match node {
            Node::Argument(mut arg) => {
                apply(&mut arg.name);
                Node::Argument(arg)
            }
            Node::Number(mut n) => {
                apply(&mut n.name);
                Node::Number(n)
            }
            Node::Date(mut n) => {
                apply(&mut n.name);
                Node::Date(n)
            }
            Node::Time(mut n) => {
                apply(&mut n.name);
                Node::Time(n)
            }
            Node::Select(mut select) => {
                apply(&mut select.name);
                select.options = rename_options(select.options, renames);
                Node::Select(select)
            }
            Node::Plural(mut plural) => {
                apply(&mut plural.name);
                plural.options = rename_options(plural.options, renames);
                Node::Plural(plural)
            }
            Node::Tag(mut tag) => {
                apply(&mut tag.name);
                tag.children = rename(tag.children, renames);
                Node::Tag(tag)
            }
            other => other,
        })
        .collect()
}

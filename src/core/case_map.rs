//! Flattened view of a message tree used for cross-locale comparison.
//!
//! Select options are recorded per key, plurals once per node so that
//! locales with different plural categories still compare equal.

use std::fmt;

use indexmap::IndexMap;

use crate::core::icu::{Node, Options, PluralType, Span};

/// Construct a case entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseKind {
    Select,
    Plural(PluralType),
}

impl CaseKind {
    pub fn is_plural(self) -> bool {
        matches!(self, CaseKind::Plural(_))
    }
}

impl fmt::Display for CaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseKind::Select => f.write_str("select"),
            CaseKind::Plural(plural_type) => f.write_str(plural_type.keyword()),
        }
    }
}

/// One entry of the case sequence, printed as `argument|kind|key`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaseEntry {
    pub argument: String,
    pub kind: CaseKind,
    /// Option key for selects, empty for plurals.
    pub key: String,
}

impl CaseEntry {
    /// Key shown to users: the option key, or the argument for plurals.
    pub fn label(&self) -> &str {
        if self.key.is_empty() {
            &self.argument
        } else {
            &self.key
        }
    }
}

impl fmt::Display for CaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.argument, self.kind, self.key)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseMap {
    /// A select or plural appears inside another one's option.
    pub nested: bool,
    /// Argument names with the span of their first occurrence.
    pub arguments: IndexMap<String, Option<Span>>,
    pub cases: Vec<CaseEntry>,
    pub literals: Vec<String>,
}

impl CaseMap {
    pub fn build(nodes: &[Node]) -> Self {
        let mut map = CaseMap::default();
        map.visit(nodes, 0);
        map
    }

    fn add_argument(&mut self, name: &str, span: Option<Span>) {
        if !self.arguments.contains_key(name) {
            self.arguments.insert(name.to_string(), span);
        }
    }

    fn visit_options(&mut self, options: &Options, depth: usize) {
        for option in options.values() {
            self.visit(&option.value, depth + 1);
        }
    }

    fn visit(&mut self, nodes: &[Node], depth: usize) {
        for node in nodes {
            if let Some(name) = node.arg_name() {
                self.add_argument(name, node.span());
            }
            match node {
                Node::Literal(literal) => self.literals.push(literal.value.clone()),
                Node::Select(select) => {
                    if depth > 0 {
                        self.nested = true;
                    }
                    for key in select.options.keys() {
                        self.cases.push(CaseEntry {
                            argument: select.name.clone(),
                            kind: CaseKind::Select,
                            key: key.clone(),
                        });
                    }
                    self.visit_options(&select.options, depth);
                }
                Node::Plural(plural) => {
                    if depth > 0 {
                        self.nested = true;
                    }
                    self.cases.push(CaseEntry {
                        argument: plural.name.clone(),
                        kind: CaseKind::Plural(plural.plural_type),
                        key: String::new(),
                    });
                    self.visit_options(&plural.options, depth);
                }
                Node::Tag(tag) => self.visit(&tag.children, depth),
                Node::Argument(_)
                | Node::Number(_)
                | Node::Date(_)
                | Node::Time(_)
                | Node::Pound(_) => {}
            }
        }
    }

    /// Target entries that do not occur anywhere in `source`.
    pub fn unrecognized_cases<'a>(&'a self, source: &CaseMap) -> Vec<&'a CaseEntry> {
        self.cases
            .iter()
            .filter(|entry| !source.cases.contains(entry))
            .collect()
    }

    /// Target argument names absent from `source`, with their first span.
    pub fn unrecognized_arguments<'a>(
        &'a self,
        source: &CaseMap,
    ) -> Vec<(&'a str, Option<Span>)> {
        self.arguments
            .iter()
            .filter(|(name, _)| !source.arguments.contains_key(*name))
            .map(|(name, span)| (name.as_str(), *span))
            .collect()
    }

    /// A plural entry precedes a select entry in traversal order.
    pub fn plural_before_select(&self) -> bool {
        self.cases
            .iter()
            .position(|entry| entry.kind.is_plural())
            .is_some_and(|plural| {
                self.cases[plural..]
                    .iter()
                    .any(|entry| entry.kind == CaseKind::Select)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icu::parse;

    fn case_map(text: &str) -> CaseMap {
        CaseMap::build(&parse(text).unwrap())
    }

    #[test]
    fn test_case_sequence() {
        let map = case_map("{a, select, x {{n, plural, one {#} other {#}}} other {}}");
        let cases: Vec<String> = map.cases.iter().map(ToString::to_string).collect();
        assert_eq!(cases, vec!["a|select|x", "a|select|other", "n|plural|"]);
        assert!(map.nested);
        assert_eq!(
            map.arguments.keys().cloned().collect::<Vec<_>>(),
            vec!["a".to_string(), "n".to_string()]
        );
    }

    #[test]
    fn test_flat_message_is_not_nested() {
        let map = case_map("Hi {name}, {n, selectordinal, other {#th}}");
        assert!(!map.nested);
        assert_eq!(map.cases[0].to_string(), "n|selectordinal|");
        assert_eq!(map.literals, vec!["Hi ", ", ", "th"]);
    }

    #[test]
    fn test_unrecognized_arguments_keep_first_span() {
        let source = case_map("An {arg}");
        let target = case_map("An {arG} {arG}");
        let diff = target.unrecognized_arguments(&source);
        assert_eq!(diff, vec![("arG", Some(Span::new(3, 8)))]);
    }

    #[test]
    fn test_unrecognized_cases() {
        let source = case_map("{a, select, other {}}");
        let target = case_map("{a, select, b {} other {}}");
        let diff = target.unrecognized_cases(&source);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].label(), "b");
    }

    #[test]
    fn test_plural_before_select() {
        assert!(case_map("{a, plural, one {} other {{b, select, other {}}}}").plural_before_select());
        assert!(!case_map("{b, select, other {{a, plural, other {}}}}").plural_before_select());
        assert!(!case_map("{a, plural, other {}}").plural_before_select());
    }
}

//! Discovery of externally-visible declarations.
//!
//! The classifier walks the top-level declarations of one file and
//! collects everything marked `public` or `open`. It deliberately does
//! not descend into type or extension bodies: members are reachable
//! only through their container's name, and extensions re-expose names
//! already captured at the primary declaration.

use std::collections::BTreeSet;

use tree_sitter::{Node, Tree};

use crate::patterns::expand_label_patterns;
use crate::swift;
use crate::symbols::FunctionSig;

/// Operator lexemes defined by the Swift standard library. These can
/// never be prefixed, so they seed the exclusion set; custom operators
/// are discovered per input and appended.
/// https://github.com/apple/swift/blob/swift-5.1.3-RELEASE/stdlib/public/core/Policy.swift
pub const STANDARD_OPERATORS: &[&str] = &[
    "++", "--", "...", "!",
    "~", "+", "-", "..<",
    "<<", "&<<", ">>", "&>>",
    "*", "&*", "/", "%", "&",
    "&+", "&-", "|", "^",
    "<", "<=", ">", ">=", "==", "!=", "===", "!==", "~=",
    "&&", "||",
    "*=", "&*=", "/=", "%=",
    "+=", "&+=", "-=", "&-=",
    "<<=", "&<<=", ">>=", "&>>=",
    "&=", "^=", "|=", "~>",
];

/// Result of classifying one or more source files.
///
/// Values are immutable once produced; multi-file aggregation goes
/// through [`Classification::merge`], and the exclusion filter is a
/// single explicit post-pass ([`Classification::without_excluded`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Names of externally-visible type/protocol/property declarations.
    pub identifiers: BTreeSet<String>,
    /// Externally-visible functions, one entry per call pattern.
    pub functions: BTreeSet<FunctionSig>,
    /// Names that must never be renamed.
    pub exclusions: BTreeSet<String>,
}

impl Classification {
    /// Start from the standard operator lexemes plus caller-supplied
    /// exclusions.
    pub fn seeded<I, S>(extra_exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut exclusions: BTreeSet<String> =
            STANDARD_OPERATORS.iter().map(|s| s.to_string()).collect();
        exclusions.extend(extra_exclusions.into_iter().map(Into::into));
        Self {
            exclusions,
            ..Self::default()
        }
    }

    /// Union two classifications. Used as the reduce step when files
    /// are classified in parallel.
    pub fn merge(mut self, other: Classification) -> Classification {
        self.identifiers.extend(other.identifiers);
        self.functions.extend(other.functions);
        self.exclusions.extend(other.exclusions);
        self
    }

    /// Drop every discovered member whose identifier is excluded.
    /// Exclusion always wins, regardless of discovery order.
    pub fn without_excluded(mut self) -> Classification {
        self.identifiers = self
            .identifiers
            .into_iter()
            .filter(|id| !self.exclusions.contains(id))
            .collect();
        self.functions = self
            .functions
            .into_iter()
            .filter(|f| !self.exclusions.contains(&f.identifier))
            .collect();
        self
    }
}

/// Declaration kinds the classifier inspects. Everything else at the
/// top level is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Type,
    Protocol,
    Function,
    Property,
    Operator,
}

impl DeclKind {
    fn of(node: &Node) -> Option<DeclKind> {
        match node.kind() {
            k if swift::TYPE_DECL_KINDS.contains(&k) => Some(DeclKind::Type),
            "protocol_declaration" => Some(DeclKind::Protocol),
            "function_declaration" => Some(DeclKind::Function),
            "property_declaration" => Some(DeclKind::Property),
            "operator_declaration" => Some(DeclKind::Operator),
            _ => None,
        }
    }
}

/// What one declaration contributes to the classification.
enum Finding {
    Identifier(String),
    Functions(Vec<FunctionSig>),
    /// An externally-visible operator: goes to the exclusion set, never
    /// to the replace set, because operator tokens cannot be prefixed.
    Operator(String),
}

/// Classify one parsed file. Pure: the result depends only on the tree
/// and its source text.
pub fn classify_file(tree: &Tree, source: &str) -> Classification {
    let root = tree.root_node();
    let mut cursor = root.walk();
    root.named_children(&mut cursor)
        .filter_map(|decl| classify_decl(&decl, source))
        .fold(Classification::default(), |mut acc, finding| {
            match finding {
                Finding::Identifier(name) => {
                    acc.identifiers.insert(name);
                }
                Finding::Functions(sigs) => {
                    acc.functions.extend(sigs);
                }
                Finding::Operator(name) => {
                    acc.exclusions.insert(name);
                }
            }
            acc
        })
}

fn classify_decl(node: &Node, source: &str) -> Option<Finding> {
    let kind = DeclKind::of(node)?;
    if !swift::is_externally_visible(node, source) {
        return None;
    }

    match kind {
        DeclKind::Type | DeclKind::Protocol => {
            if swift::is_extension(node) {
                return None;
            }
            let name = swift::name_node(node)?;
            Some(Finding::Identifier(
                swift::node_text(&name, source).to_string(),
            ))
        }
        DeclKind::Function => {
            let name = swift::name_node(node)?;
            if name.kind() != "simple_identifier" {
                // Operator function (`public func +++`): the lexeme is
                // excluded instead of renamed.
                return Some(Finding::Operator(
                    swift::node_text(&name, source).to_string(),
                ));
            }
            let identifier = swift::node_text(&name, source);
            let signature = swift::signature_text(node, source)?;
            let params = swift::parameters(node, source);
            let sigs = expand_label_patterns(&params)
                .into_iter()
                .map(|args| FunctionSig::new(identifier, signature, args))
                .collect();
            log::debug!("classified function {identifier}{signature}");
            Some(Finding::Functions(sigs))
        }
        DeclKind::Property => {
            let name = swift::property_name(node, source)?;
            Some(Finding::Identifier(name.to_string()))
        }
        DeclKind::Operator => {
            let name = swift::name_node(node)?;
            Some(Finding::Operator(
                swift::node_text(&name, source).to_string(),
            ))
        }
    }
}

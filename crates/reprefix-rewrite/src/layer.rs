//! One self-contained rename map.

use std::collections::BTreeSet;

use reprefix_syntax::classify::Classification;
use reprefix_syntax::symbols::FunctionSig;

use crate::report::Report;

/// A prefix plus the names it renames. Immutable after construction;
/// composition builds new trees, never edits a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameLayer {
    prefix: String,
    identifiers: BTreeSet<String>,
    functions: BTreeSet<FunctionSig>,
    /// Function names, derived from `functions` for token matching.
    fn_names: BTreeSet<String>,
    modules: BTreeSet<String>,
}

impl RenameLayer {
    pub fn new(
        prefix: impl Into<String>,
        identifiers: BTreeSet<String>,
        functions: BTreeSet<FunctionSig>,
        modules: BTreeSet<String>,
    ) -> Self {
        let fn_names = functions.iter().map(|f| f.identifier.clone()).collect();
        Self {
            prefix: prefix.into(),
            identifiers,
            functions,
            fn_names,
            modules,
        }
    }

    /// The inert layer used in reports-only mode: nothing matches, the
    /// prefix is empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the base layer from classifier output. The classification
    /// is expected to already have its exclusion filter applied.
    pub fn from_classification(
        prefix: impl Into<String>,
        classification: &Classification,
        modules: impl IntoIterator<Item = String>,
    ) -> Self {
        Self::new(
            prefix,
            classification.identifiers.clone(),
            classification.functions.clone(),
            modules.into_iter().collect(),
        )
    }

    /// Build a layer from a persisted report.
    pub fn from_report(report: &Report) -> Self {
        Self::new(
            report.prefix.clone(),
            report.identifiers.iter().cloned().collect(),
            report.fn_replace.iter().map(|f| f.to_sig()).collect(),
            report.products.iter().flatten().cloned().collect(),
        )
    }

    /// A single-identifier layer for a manual `prefix:identifier`
    /// rewrite token. The prefix gets a `_` separator appended.
    pub fn manual(prefix: &str, identifier: &str) -> Self {
        Self::new(
            format!("{prefix}_"),
            BTreeSet::from([identifier.to_string()]),
            BTreeSet::new(),
            BTreeSet::new(),
        )
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty() && self.functions.is_empty() && self.modules.is_empty()
    }

    /// Whether the plain identifier-token rule renames `text`.
    pub fn renames_identifier(&self, text: &str) -> bool {
        self.identifiers.contains(text)
            || self.modules.contains(text)
            || self.fn_names.contains(text)
    }

    pub fn renames_module(&self, text: &str) -> bool {
        self.modules.contains(text)
    }

    /// Whether any function entry shares this name. Call sites with
    /// such a callee are matched against stored patterns instead of
    /// the plain identifier rule.
    pub fn has_function_named(&self, name: &str) -> bool {
        self.fn_names.contains(name)
    }

    pub fn functions_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FunctionSig> {
        self.functions.iter().filter(move |f| f.identifier == name)
    }

    /// Whether a declaration with this name and canonical signature is
    /// renamed by this layer.
    pub fn declares_function(&self, identifier: &str, signature: &str) -> bool {
        self.functions
            .iter()
            .any(|f| f.declares(identifier, signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{FnReplace, Report};

    #[test]
    fn layer_from_report_carries_everything() {
        let report = Report {
            prefix: "A_".into(),
            identifiers: vec!["Foo".into()],
            fn_replace: vec![FnReplace {
                identifier: "f".into(),
                signature: "(x: Int)".into(),
                args: Some(vec![Some("x".into())]),
            }],
            products: Some(vec!["MyKit".into()]),
        };
        let layer = RenameLayer::from_report(&report);
        assert_eq!(layer.prefix(), "A_");
        assert!(layer.renames_identifier("Foo"));
        assert!(layer.renames_identifier("f"));
        assert!(layer.renames_module("MyKit"));
        assert!(layer.declares_function("f", "(x: Int)"));
    }

    #[test]
    fn manual_layer_appends_separator() {
        let layer = RenameLayer::manual("NS", "Widget");
        assert_eq!(layer.prefix(), "NS_");
        assert!(layer.renames_identifier("Widget"));
        assert!(!layer.renames_identifier("Other"));
    }

    #[test]
    fn empty_layer_matches_nothing() {
        let layer = RenameLayer::empty();
        assert!(layer.is_empty());
        assert!(!layer.renames_identifier("Foo"));
    }
}

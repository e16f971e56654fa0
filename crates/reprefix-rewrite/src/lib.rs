//! Rename layers and the prefix-insertion rewriter.
//!
//! A [`RenameLayer`] is one self-contained rename map: a prefix plus
//! the identifiers, function signatures, and module names it applies
//! to. Layers come from three places: the classifier's discoveries
//! (the base layer), previously persisted [`Report`]s, and manual
//! `prefix:identifier` tokens. [`rewriter::compose`] folds an ordered
//! list of layers over one source file.

pub mod layer;
pub mod report;
pub mod rewriter;

pub use layer::RenameLayer;
pub use report::{FnReplace, Report, ReportError};
pub use rewriter::{apply, compose, compose_tree};

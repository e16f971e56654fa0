//! Swift parsing and public-symbol discovery for reprefix.
//!
//! This crate owns the read side of the pipeline: parsing Swift sources
//! with tree-sitter, walking the top-level declarations of each file,
//! and collecting the identifiers and function signatures that are
//! visible outside their module (`public` / `open`).
//!
//! Rewriting lives in `reprefix-rewrite`; this crate only discovers
//! what there is to rename.

pub mod classify;
pub mod parse;
pub mod patterns;
pub mod swift;
pub mod symbols;

pub use classify::{Classification, classify_file};
pub use parse::{SyntaxError, parse_source};
pub use patterns::expand_label_patterns;
pub use swift::Parameter;
pub use symbols::{ArgLabels, FunctionSig};

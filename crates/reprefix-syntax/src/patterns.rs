//! Argument-label pattern expansion for defaulted parameters.
//!
//! A Swift function with defaulted parameters accepts several call
//! arities: every defaulted parameter can be omitted independently of
//! the others. A single declaration therefore corresponds to a set of
//! argument-label sequences, and call-site matching must recognize all
//! of them.

use crate::swift::Parameter;
use crate::symbols::ArgLabels;

/// Expand a parameter list into every argument-label sequence that can
/// invoke it.
///
/// Parameters are scanned left to right. Each parameter appends its
/// label to every sequence accumulated so far; if it carries a default
/// value, every accumulated sequence is additionally duplicated with
/// that label dropped. The result is one sequence per combination of
/// omitted defaulted parameters: a function with `k` defaults expands
/// to `2^k` sequences (duplicates collapse when labels repeat).
pub fn expand_label_patterns(params: &[Parameter]) -> Vec<ArgLabels> {
    let mut patterns: Vec<ArgLabels> = vec![Vec::new()];

    for param in params {
        for pattern in &mut patterns {
            pattern.push(param.label.clone());
        }
        if param.has_default {
            // Branch every sequence into included / omitted variants.
            let omitted: Vec<ArgLabels> = patterns
                .iter()
                .map(|p| p[..p.len() - 1].to_vec())
                .collect();
            patterns.extend(omitted);
        }
    }

    patterns.dedup();
    patterns
}

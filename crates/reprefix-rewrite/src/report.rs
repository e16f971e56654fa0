//! Persisted rename reports.
//!
//! A report is the serializable projection of one rename layer. It is
//! written after a run (`--report`) and loaded by later invocations
//! (`--include`) so that separately-built modules agree on how shared
//! symbols were renamed.

use serde::{Deserialize, Serialize};

use reprefix_syntax::classify::Classification;
use reprefix_syntax::symbols::FunctionSig;

/// Error raised while decoding or encoding a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid report: {0}")]
    Json(#[from] serde_json::Error),
}

/// One function entry; `args` is a single argument-label pattern with
/// `null` as the no-label placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FnReplace {
    pub identifier: String,
    pub signature: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Option<String>>>,
}

impl FnReplace {
    pub fn to_sig(&self) -> FunctionSig {
        FunctionSig {
            identifier: self.identifier.clone(),
            signature: self.signature.clone(),
            args: self.args.clone(),
        }
    }

    pub fn from_sig(sig: &FunctionSig) -> Self {
        Self {
            identifier: sig.identifier.clone(),
            signature: sig.signature.clone(),
            args: sig.args.clone(),
        }
    }
}

/// The on-disk report format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub prefix: String,
    pub identifiers: Vec<String>,
    #[serde(rename = "fnReplace")]
    pub fn_replace: Vec<FnReplace>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<String>>,
}

impl Report {
    /// Project a classification into a report. Sets are already sorted,
    /// so output is deterministic across runs.
    pub fn from_classification(
        prefix: impl Into<String>,
        classification: &Classification,
        products: Vec<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            identifiers: classification.identifiers.iter().cloned().collect(),
            fn_replace: classification
                .functions
                .iter()
                .map(FnReplace::from_sig)
                .collect(),
            products: Some(products),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_format() {
        let raw = r#"{
            "prefix": "ZZ_",
            "identifiers": ["Foo", "bar"],
            "fnReplace": [
                {"identifier": "f", "signature": "(x: Int)", "args": ["x"]},
                {"identifier": "f", "signature": "(x: Int, y: Int = 0)", "args": ["x", null]}
            ],
            "products": ["MyKit"]
        }"#;
        let report = Report::from_json(raw).unwrap();
        assert_eq!(report.prefix, "ZZ_");
        assert_eq!(report.identifiers, vec!["Foo", "bar"]);
        assert_eq!(report.fn_replace.len(), 2);
        assert_eq!(
            report.fn_replace[1].args,
            Some(vec![Some("x".to_string()), None])
        );
        assert_eq!(report.products, Some(vec!["MyKit".to_string()]));
    }

    #[test]
    fn args_and_products_are_optional() {
        let raw = r#"{
            "prefix": "A_",
            "identifiers": [],
            "fnReplace": [{"identifier": "g", "signature": "()"}]
        }"#;
        let report = Report::from_json(raw).unwrap();
        assert_eq!(report.fn_replace[0].args, None);
        assert_eq!(report.products, None);
    }

    #[test]
    fn round_trips_through_json() {
        let report = Report {
            prefix: "P_".into(),
            identifiers: vec!["A".into()],
            fn_replace: vec![FnReplace {
                identifier: "f".into(),
                signature: "(_ x: Int)".into(),
                args: Some(vec![None]),
            }],
            products: Some(vec![]),
        };
        let back = Report::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Report::from_json("{\"prefix\": 3}").is_err());
    }
}

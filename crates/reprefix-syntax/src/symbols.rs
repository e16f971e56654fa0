//! Symbol types shared by the classifier and the rewrite layers.

/// One call-site argument-label sequence. `None` is the no-label slot
/// (a `_` parameter, or an unlabeled argument).
pub type ArgLabels = Vec<Option<String>>;

/// A discovered function, flattened to one entry per argument-label
/// pattern so the set maps 1:1 onto the report wire format.
///
/// Declaration-site matching compares only `identifier` + `signature`;
/// `args` participates in call-site matching and in set identity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionSig {
    /// Function name as written at the declaration.
    pub identifier: String,
    /// Canonical signature text, see [`crate::swift::signature_text`].
    pub signature: String,
    /// One valid call arity; `None` when a report carried no patterns.
    pub args: Option<ArgLabels>,
}

impl FunctionSig {
    pub fn new(identifier: impl Into<String>, signature: impl Into<String>, args: ArgLabels) -> Self {
        Self {
            identifier: identifier.into(),
            signature: signature.into(),
            args: Some(args),
        }
    }

    /// Whether this entry declares the same function as `(identifier, signature)`.
    pub fn declares(&self, identifier: &str, signature: &str) -> bool {
        self.identifier == identifier && self.signature == signature
    }
}

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The input to classification and prompt composition: a term plus the
/// context sets the surrounding application collected for it.
///
/// At least one of the three context sets must be non-empty; a bare term
/// with no context carries no classification signal and no material for
/// the context prompt modules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermContext {
    /// The term under definition.
    pub term: String,
    /// Organizational context: departments, registers, working areas.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub organizational_context: BTreeSet<String>,
    /// Legal context: acts, decrees, case law references.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub legal_context: BTreeSet<String>,
    /// Statutory basis: the specific articles grounding the term.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub statutory_basis: BTreeSet<String>,
}

/// Errors raised when a [`TermContext`] fails its structural invariant.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("term is empty")]
    EmptyTerm,
    #[error("term {0:?} has no context: all three context sets are empty")]
    NoContext(String),
}

impl TermContext {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            organizational_context: BTreeSet::new(),
            legal_context: BTreeSet::new(),
            statutory_basis: BTreeSet::new(),
        }
    }

    pub fn with_organizational(mut self, entry: impl Into<String>) -> Self {
        self.organizational_context.insert(entry.into());
        self
    }

    pub fn with_legal(mut self, entry: impl Into<String>) -> Self {
        self.legal_context.insert(entry.into());
        self
    }

    pub fn with_statutory(mut self, entry: impl Into<String>) -> Self {
        self.statutory_basis.insert(entry.into());
        self
    }

    /// Validate the structural invariant: non-empty term, at least one
    /// non-empty context set.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.term.trim().is_empty() {
            return Err(ContextError::EmptyTerm);
        }
        if self.organizational_context.is_empty()
            && self.legal_context.is_empty()
            && self.statutory_basis.is_empty()
        {
            return Err(ContextError::NoContext(self.term.clone()));
        }
        Ok(())
    }

    /// All context entries across the three sets, in deterministic order.
    pub fn all_entries(&self) -> impl Iterator<Item = &String> {
        self.organizational_context
            .iter()
            .chain(self.legal_context.iter())
            .chain(self.statutory_basis.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_with_one_context_set() {
        let ctx = TermContext::new("vergunning").with_legal("Omgevingswet");
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn invalid_without_any_context() {
        let ctx = TermContext::new("vergunning");
        assert!(matches!(ctx.validate(), Err(ContextError::NoContext(_))));
    }

    #[test]
    fn invalid_with_empty_term() {
        let ctx = TermContext::new("  ").with_legal("Awb");
        assert!(matches!(ctx.validate(), Err(ContextError::EmptyTerm)));
    }

    #[test]
    fn all_entries_is_deterministic() {
        let ctx = TermContext::new("besluit")
            .with_organizational("afdeling vergunningen")
            .with_legal("Awb")
            .with_legal("Omgevingswet")
            .with_statutory("artikel 1:3 Awb");
        let entries: Vec<_> = ctx.all_entries().cloned().collect();
        assert_eq!(
            entries,
            vec![
                "afdeling vergunningen",
                "Awb",
                "Omgevingswet",
                "artikel 1:3 Awb"
            ]
        );
    }

    #[test]
    fn context_serde_round_trip() {
        let ctx = TermContext::new("besluit").with_statutory("artikel 1:3 Awb");
        let json = serde_json::to_string(&ctx).unwrap();
        let back: TermContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
    }
}

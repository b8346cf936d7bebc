#![deny(unsafe_code)]
//! # glossa-types
//!
//! Shared data model for the glossa definition pipeline.
//!
//! Everything here is a plain, serde-serializable value type. The three
//! processing crates (classifier, prompt, scorer) and the gate exchange
//! these types and nothing else; none of them own mutable shared state.
//!
//! ## Key Types
//!
//! - [`Category`] — the ontological class a term is classified into
//! - [`TermContext`] — the input to classification and composition
//! - [`ClassificationResult`] — winner, confidence, per-category scores
//! - [`ModuleOutput`] / [`ComposedArtifact`] — prompt composition output
//! - [`RuleResult`] / [`ValidationResult`] — scoring output
//! - [`GateState`] / [`GateDecision`] — the accept/reject contract

pub mod category;
pub mod classification;
pub mod context;
pub mod gate;
pub mod prompt;
pub mod validation;

pub use category::Category;
pub use classification::{ClassificationResult, ConfidenceLabel};
pub use context::{ContextError, TermContext};
pub use gate::{GateDecision, GateState};
pub use prompt::{ComposedArtifact, ModuleOutput};
pub use validation::{round2, RuleResult, Severity, ValidationResult};

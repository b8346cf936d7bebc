#![deny(unsafe_code)]
//! # glossa-scorer
//!
//! Scores a generated definition against a compiled
//! [`RuleCatalog`](glossa_config::RuleCatalog).
//!
//! Every rule evaluates independently. Declarative rules match their
//! compiled regex patterns; built-in checks implement the conventions
//! that patterns cannot express (circularity, sentence counting, word
//! bands); callers may register [`CustomCheck`] rules alongside. A check
//! that fails to evaluate is captured as a failed rule result carrying
//! the error message — one broken rule never aborts scoring of the rest.
//!
//! Scoring is deterministic: identical `(text, catalog_version)` always
//! produces an identical [`ValidationResult`](glossa_types::ValidationResult).

pub mod checks;
pub mod scorer;

pub use checks::CheckError;
pub use scorer::{score, CustomCheck, ValidationScorer};

#![deny(unsafe_code)]
//! # glossa-classifier
//!
//! Decides which ontological [`Category`](glossa_types::Category) a term
//! belongs to.
//!
//! The classifier is a pure function over a [`TermContext`](glossa_types::TermContext)
//! and an immutable [`ClassifierConfig`](glossa_config::ClassifierConfig)
//! snapshot:
//!
//! 1. suffix weights and context hints produce a base score per category;
//! 2. domain overrides force a curated category's score;
//! 3. a clear winner (margin ≥ `tie_break_margin`) stands;
//! 4. close calls go through the priority cascade — the first category in
//!    the configured order whose score reaches `viability_threshold`;
//! 5. confidence scales the winner's score by how decisive the margin was.
//!
//! Classification never fails: a term with no signal at all resolves
//! through the cascade's fallback with LOW confidence.

pub mod classifier;
pub mod scoring;

pub use classifier::TermClassifier;

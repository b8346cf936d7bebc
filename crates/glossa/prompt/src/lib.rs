#![deny(unsafe_code)]
//! # glossa-prompt
//!
//! The prompt composition engine: independent content modules, each
//! declaring an id, a priority, and its dependencies, assembled by the
//! orchestrator into one reproducible generation instruction.
//!
//! ## Architecture
//!
//! ```text
//! PromptModule × N ──▶ PromptOrchestrator ──▶ ComposedArtifact
//!        (declare deps)    (topological sort,      (sections in
//!                           priority tie-break)     emission order)
//! ```
//!
//! Composition is pure: modules read the shared [`PromptContext`] and
//! return a fragment; the orchestrator orders and concatenates. Emission
//! order respects the dependency graph; among modules that become ready
//! at the same step, higher priority goes first and lexicographic module
//! id breaks the remaining ties, so output is identical across runs and
//! across registration orders.

pub mod error;
pub mod module;
pub mod modules;
pub mod orchestrator;

pub use error::ComposeError;
pub use module::{PromptContext, PromptModule};
pub use modules::standard_modules;
pub use orchestrator::PromptOrchestrator;

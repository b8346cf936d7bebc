#![deny(unsafe_code)]
//! # glossa-pipeline
//!
//! The end-to-end definition flow:
//!
//! ```text
//! TermContext ─▶ classify ─▶ compose ─▶ [Generator] ─▶ score ─▶ gate
//! ```
//!
//! The pipeline coordinates, never generates: text generation is
//! delegated to a caller-supplied [`Generator`]. If generation fails or
//! the caller abandons the run, scoring is never invoked, and the
//! pipeline never retries generation itself — retry and backoff belong
//! to the collaborator.
//!
//! Configuration comes from a [`ConfigStore`](glossa_config::ConfigStore)
//! snapshot taken once per run, so a concurrent reload never changes the
//! rules mid-flight.

pub mod error;
pub mod generator;
pub mod pipeline;
pub mod revision;

pub use error::PipelineError;
pub use generator::{GenerationError, Generator};
pub use pipeline::{DefinitionPipeline, PipelineOutcome};
pub use revision::RevisionPromptBuilder;

#![deny(unsafe_code)]
//! # glossa-config
//!
//! Strongly typed, eagerly validated configuration for the glossa
//! pipeline: the classifier parameters and the validation rule catalog.
//!
//! Configuration is structured TOML parsed through serde. Every entry is
//! validated at load time — a malformed rule or classifier parameter is a
//! [`ConfigError`] naming the offender, raised before the first request,
//! never mid-request.
//!
//! Loaded configuration is immutable. [`ConfigStore`] supports runtime
//! reload by snapshot-and-swap: a reload produces a new immutable
//! snapshot behind an `Arc`, and in-flight evaluations keep the snapshot
//! they started with.

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod store;

pub use catalog::{
    AcceptancePolicy, BuiltinCheck, Detection, RuleCatalog, ValidationRule, DEFAULT_CATALOG_TOML,
};
pub use classifier::{ClassifierConfig, ContextHint, ContextSource, DomainOverride, SuffixWeight};
pub use error::ConfigError;
pub use store::ConfigStore;

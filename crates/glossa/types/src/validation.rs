use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Round to two decimal places, the resolution every aggregated score is
/// reported at.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// How serious a rule violation is. Severity does not affect the score
/// arithmetic; it drives presentation and revision-prompt emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ── Rule Result ──────────────────────────────────────────────────────

/// Outcome of one rule evaluated against one text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub passed: bool,
    /// Score in [0, 1]. 1.0 when passed; a failed rule scores 0.0 unless
    /// the rule defines partial scoring.
    pub score: f64,
    pub message: String,
    pub severity: Severity,
    /// Concrete rewording advice, when the rule carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl RuleResult {
    pub fn pass(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: true,
            score: 1.0,
            message: message.into(),
            severity,
            suggestion: None,
        }
    }

    pub fn fail(
        rule_id: impl Into<String>,
        severity: Severity,
        score: f64,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            passed: false,
            score: score.clamp(0.0, 1.0),
            message: message.into(),
            severity,
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

// ── Validation Result ────────────────────────────────────────────────

/// The scorer's output for one text against one catalog version.
///
/// Identical `(text, catalog_version)` inputs always produce identical
/// results; re-validation is idempotent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Weight-normalized mean over all evaluated rules, rounded to two
    /// decimals.
    pub overall_score: f64,
    /// Unweighted mean of rule scores per rule category. A category with
    /// no evaluated rules is absent rather than 0.0.
    pub category_scores: BTreeMap<String, f64>,
    /// Failed rules, in catalog order.
    pub violations: Vec<RuleResult>,
    /// Ids of passed rules, in catalog order.
    pub passed_rules: Vec<String>,
    /// Version of the catalog that produced this result.
    pub catalog_version: String,
}

impl ValidationResult {
    pub fn category_score(&self, category: &str) -> Option<f64> {
        self.category_scores.get(category).copied()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn rule_count(&self) -> usize {
        self.violations.len() + self.passed_rules.len()
    }

    /// Violations at a given severity, in catalog order.
    pub fn violations_at(&self, severity: Severity) -> impl Iterator<Item = &RuleResult> {
        self.violations.iter().filter(move |v| v.severity == severity)
    }
}

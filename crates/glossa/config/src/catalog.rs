use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use glossa_types::Severity;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// ── Detection ────────────────────────────────────────────────────────

/// Built-in checks a rule may reference by name. The closed set lives
/// here so a catalog referencing an unknown check is rejected at load;
/// the behavior lives in the scorer.
#[derive(Clone, Debug, PartialEq)]
pub enum BuiltinCheck {
    /// The definition must not restate the term it defines.
    NotCircular,
    /// The definition length must fall inside a word-count band.
    WordCount { min: usize, max: usize },
    /// The definition must be a single sentence.
    SingleSentence,
    /// The definition must not open with a capitalized echo of the term
    /// or a meta phrase ("Dit begrip…").
    StartsClean,
    /// None of the listed phrases may occur.
    NoForbiddenPhrases { phrases: Vec<String> },
}

/// How a rule detects a violation: declarative regex patterns or a named
/// built-in check. Patterns are compiled once here, at load time.
#[derive(Clone, Debug)]
pub enum Detection {
    Patterns {
        /// Every positive pattern must match.
        positive: Vec<Regex>,
        /// No negative pattern may match.
        negative: Vec<Regex>,
        /// When set, a rule failing only on positive patterns scores the
        /// fraction of positive patterns that did match.
        partial: bool,
    },
    Builtin(BuiltinCheck),
}

/// One validation rule, compiled and ready to evaluate.
#[derive(Clone, Debug)]
pub struct ValidationRule {
    pub id: String,
    pub category: String,
    pub weight: f64,
    pub severity: Severity,
    pub message: String,
    pub suggestion: Option<String>,
    pub detection: Detection,
}

// ── Acceptance Policy ────────────────────────────────────────────────

fn default_threshold() -> f64 {
    0.60
}

/// Gate thresholds that travel with the catalog.
#[derive(Clone, Debug, Deserialize)]
pub struct AcceptancePolicy {
    /// Global minimum for the overall score.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Per-category minimum scores; a listed category must reach its
    /// minimum for acceptance.
    #[serde(default)]
    pub category_minimums: BTreeMap<String, f64>,
    /// Completeness facts that must hold when persistence is requested.
    #[serde(default)]
    pub required_facts: Vec<String>,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            category_minimums: BTreeMap::new(),
            required_facts: Vec::new(),
        }
    }
}

// ── Raw file form ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CatalogFile {
    version: String,
    #[serde(default)]
    acceptance: AcceptancePolicy,
    #[serde(default)]
    rules: Vec<RuleSpec>,
}

#[derive(Deserialize)]
struct RuleSpec {
    id: String,
    category: String,
    weight: f64,
    severity: Severity,
    message: String,
    #[serde(default)]
    suggestion: Option<String>,
    #[serde(default)]
    positive_patterns: Vec<String>,
    #[serde(default)]
    negative_patterns: Vec<String>,
    #[serde(default)]
    partial_scoring: bool,
    #[serde(default)]
    check: Option<String>,
    #[serde(default)]
    min_words: Option<usize>,
    #[serde(default)]
    max_words: Option<usize>,
    #[serde(default)]
    phrases: Vec<String>,
}

// ── Rule Catalog ─────────────────────────────────────────────────────

/// The versioned, weighted, categorized set of checks used to score
/// generated definitions. Immutable after load.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    pub version: String,
    pub acceptance: AcceptancePolicy,
    rules: Vec<ValidationRule>,
    pub loaded_at: DateTime<Utc>,
}

impl RuleCatalog {
    /// Parse and compile a catalog from TOML, rejecting malformed entries
    /// eagerly with the offending rule id in the error.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if !(0.0..=1.0).contains(&file.acceptance.threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                name: "acceptance.threshold",
                value: file.acceptance.threshold,
            });
        }
        for (category, minimum) in &file.acceptance.category_minimums {
            if !(0.0..=1.0).contains(minimum) {
                return Err(ConfigError::InvalidCategoryMinimum {
                    category: category.clone(),
                    minimum: *minimum,
                });
            }
        }

        let mut rules = Vec::with_capacity(file.rules.len());
        for spec in file.rules {
            let rule = compile_rule(spec)?;
            if rules.iter().any(|r: &ValidationRule| r.id == rule.id) {
                return Err(ConfigError::DuplicateRuleId(rule.id));
            }
            rules.push(rule);
        }

        tracing::debug!(
            version = %file.version,
            rules = rules.len(),
            "rule catalog compiled"
        );

        Ok(Self {
            version: file.version,
            acceptance: file.acceptance,
            rules,
            loaded_at: Utc::now(),
        })
    }

    /// Load and compile a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// The built-in catalog shipped with the library.
    pub fn builtin() -> Self {
        Self::from_toml_str(DEFAULT_CATALOG_TOML)
            .unwrap_or_else(|e| panic!("built-in catalog must compile: {e}"))
    }

    /// Rules in catalog order.
    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&ValidationRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct rule categories, in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for rule in &self.rules {
            if !seen.contains(&rule.category.as_str()) {
                seen.push(rule.category.as_str());
            }
        }
        seen
    }
}

fn compile_rule(spec: RuleSpec) -> Result<ValidationRule, ConfigError> {
    if spec.weight <= 0.0 || !spec.weight.is_finite() {
        return Err(ConfigError::NonPositiveWeight {
            rule: spec.id,
            weight: spec.weight,
        });
    }
    if spec.category.trim().is_empty() {
        return Err(ConfigError::EmptyRuleCategory { rule: spec.id });
    }

    let has_patterns = !spec.positive_patterns.is_empty() || !spec.negative_patterns.is_empty();
    let detection = match (&spec.check, has_patterns) {
        (Some(_), true) => {
            return Err(ConfigError::ConflictingDetection { rule: spec.id });
        }
        (None, false) => {
            return Err(ConfigError::MissingDetection { rule: spec.id });
        }
        (Some(name), false) => Detection::Builtin(compile_check(&spec.id, name, &spec)?),
        (None, true) => Detection::Patterns {
            positive: compile_patterns(&spec.id, &spec.positive_patterns)?,
            negative: compile_patterns(&spec.id, &spec.negative_patterns)?,
            partial: spec.partial_scoring,
        },
    };

    Ok(ValidationRule {
        id: spec.id,
        category: spec.category,
        weight: spec.weight,
        severity: spec.severity,
        message: spec.message,
        suggestion: spec.suggestion,
        detection,
    })
}

fn compile_patterns(rule: &str, patterns: &[String]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| ConfigError::InvalidPattern {
                rule: rule.to_string(),
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

fn compile_check(rule: &str, name: &str, spec: &RuleSpec) -> Result<BuiltinCheck, ConfigError> {
    match name {
        "not_circular" => Ok(BuiltinCheck::NotCircular),
        "single_sentence" => Ok(BuiltinCheck::SingleSentence),
        "starts_clean" => Ok(BuiltinCheck::StartsClean),
        "word_count" => {
            let min = spec.min_words.unwrap_or(5);
            let max = spec.max_words.unwrap_or(45);
            if min == 0 || min > max {
                return Err(ConfigError::InvalidCheckParams {
                    rule: rule.to_string(),
                    detail: format!("word_count needs 0 < min_words <= max_words, got {min}..{max}"),
                });
            }
            Ok(BuiltinCheck::WordCount { min, max })
        }
        "no_forbidden_phrases" => {
            if spec.phrases.iter().all(|p| p.trim().is_empty()) {
                return Err(ConfigError::InvalidCheckParams {
                    rule: rule.to_string(),
                    detail: "no_forbidden_phrases needs at least one phrase".to_string(),
                });
            }
            Ok(BuiltinCheck::NoForbiddenPhrases {
                phrases: spec.phrases.clone(),
            })
        }
        other => Err(ConfigError::UnknownCheck {
            rule: rule.to_string(),
            check: other.to_string(),
        }),
    }
}

/// The catalog shipped with the library: definition-writing conventions
/// for Dutch administrative vocabulary, grouped into essence (ESS),
/// context (CON), language (TAAL), structure (STR), and juridical (JUR)
/// rule categories.
pub const DEFAULT_CATALOG_TOML: &str = r##"
version = "2024.1"

[acceptance]
threshold = 0.60
required_facts = ["has_usage_example"]

[acceptance.category_minimums]
ESS = 0.60
TAAL = 0.50

[[rules]]
id = "ESS-001"
category = "ESS"
weight = 1.0
severity = "error"
message = "definition must open with a genus (an article plus a noun phrase)"
suggestion = "start with 'een <broader concept>' and narrow it down"
positive_patterns = ['(?i)^(een|de|het)\s+\p{L}+']

[[rules]]
id = "ESS-002"
category = "ESS"
weight = 1.0
severity = "error"
message = "definition restates the term instead of defining it"
check = "not_circular"

[[rules]]
id = "ESS-003"
category = "ESS"
weight = 0.8
severity = "warning"
message = "definition lacks a distinguishing clause"
suggestion = "add a 'die/dat/waarbij' clause that separates this concept from its neighbours"
positive_patterns = ['(?i)\b(die|dat|waarbij|waarmee|waarvoor|bestemd voor)\b']

[[rules]]
id = "CON-001"
category = "CON"
weight = 0.6
severity = "warning"
message = "definition is not anchored to an actor or setting"
positive_patterns = ['(?i)\b(door|binnen|bij|namens|van een)\b']

[[rules]]
id = "CON-002"
category = "CON"
weight = 0.5
severity = "warning"
message = "definition trails off into vague enumeration"
negative_patterns = ['(?i)\b(enzovoort|enz\.|etc\.?|en dergelijke)\b']

[[rules]]
id = "TAAL-001"
category = "TAAL"
weight = 0.8
severity = "error"
message = "definition must be a single sentence"
check = "single_sentence"

[[rules]]
id = "TAAL-002"
category = "TAAL"
weight = 0.6
severity = "warning"
message = "definition length outside the 5-45 word band"
check = "word_count"
min_words = 5
max_words = 45

[[rules]]
id = "TAAL-003"
category = "TAAL"
weight = 0.9
severity = "error"
message = "definition uses a forbidden meta phrase"
suggestion = "state what the concept is, not that it is a concept"
check = "no_forbidden_phrases"
phrases = ["is een begrip", "wordt verstaan onder", "is de benaming voor", "betekent dat"]

[[rules]]
id = "TAAL-004"
category = "TAAL"
weight = 0.4
severity = "warning"
message = "definition addresses the reader directly"
negative_patterns = ['(?i)\b(ik|wij|jij|je|u)\b']

[[rules]]
id = "STR-001"
category = "STR"
weight = 0.5
severity = "warning"
message = "definition must not open with a capitalized echo or meta phrase"
check = "starts_clean"

[[rules]]
id = "STR-002"
category = "STR"
weight = 0.4
severity = "info"
message = "definition contains list formatting"
negative_patterns = ['(?m)^\s*[-*]\s', '\d\)\s']

[[rules]]
id = "JUR-001"
category = "JUR"
weight = 0.3
severity = "info"
message = "definition names no statutory anchor"
suggestion = "name the act or article the concept derives from, when one exists"
positive_patterns = ['(?i)\b(wet|artikel|besluit|regeling|verordening)\b']
"##;

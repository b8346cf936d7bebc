use crate::error::ConfigError;
use glossa_types::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ── Parts ────────────────────────────────────────────────────────────

/// Suffix evidence for one category: a term ending in one of `suffixes`
/// contributes `weight` to that category's base score.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SuffixWeight {
    pub category: Category,
    pub suffixes: Vec<String>,
    pub weight: f64,
}

/// Which context set a hint reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextSource {
    Organizational,
    Legal,
    Statutory,
}

/// Context evidence: when a keyword occurs in the named context set, the
/// category's score gets an additive `boost`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContextHint {
    pub category: Category,
    pub source: ContextSource,
    pub keywords: Vec<String>,
    pub boost: f64,
}

fn default_override_score() -> f64 {
    0.95
}

/// A curated term→category decision that bypasses suffix scoring for the
/// forced category. Other categories keep their computed scores and can
/// still win the cascade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DomainOverride {
    pub term: String,
    pub category: Category,
    #[serde(default = "default_override_score")]
    pub score: f64,
}

// ── Classifier Config ────────────────────────────────────────────────

fn default_tie_break_margin() -> f64 {
    0.15
}
fn default_viability_threshold() -> f64 {
    0.30
}
fn default_confidence_high() -> f64 {
    0.70
}
fn default_confidence_medium() -> f64 {
    0.45
}
fn default_category_priority() -> Vec<Category> {
    vec![
        Category::Exemplaar,
        Category::Type,
        Category::Resultaat,
        Category::Proces,
    ]
}

/// Classifier parameters. The numeric defaults are domain-tuned; they are
/// serde defaults so a config file only needs to state what it changes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Minimum winner-to-runner-up gap for the raw top score to stand.
    #[serde(default = "default_tie_break_margin")]
    pub tie_break_margin: f64,
    /// Minimum score a category needs to win through the cascade.
    #[serde(default = "default_viability_threshold")]
    pub viability_threshold: f64,
    /// Confidence at or above this labels HIGH.
    #[serde(default = "default_confidence_high")]
    pub confidence_high: f64,
    /// Confidence at or above this labels MEDIUM.
    #[serde(default = "default_confidence_medium")]
    pub confidence_medium: f64,
    /// Cascade order; must list every category exactly once.
    #[serde(default = "default_category_priority")]
    pub category_priority: Vec<Category>,
    #[serde(default)]
    pub suffix_weights: Vec<SuffixWeight>,
    #[serde(default)]
    pub context_hints: Vec<ContextHint>,
    #[serde(default)]
    pub domain_overrides: Vec<DomainOverride>,
}

#[derive(Deserialize)]
struct ClassifierFile {
    classifier: ClassifierConfig,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            tie_break_margin: default_tie_break_margin(),
            viability_threshold: default_viability_threshold(),
            confidence_high: default_confidence_high(),
            confidence_medium: default_confidence_medium(),
            category_priority: default_category_priority(),
            suffix_weights: default_suffix_weights(),
            context_hints: default_context_hints(),
            domain_overrides: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    /// Parse from a TOML document with a `[classifier]` table and
    /// validate eagerly.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let file: ClassifierFile =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        file.classifier.validate()?;
        Ok(file.classifier)
    }

    /// Load and validate from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate every parameter, naming the offender on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("tie_break_margin", self.tie_break_margin),
            ("viability_threshold", self.viability_threshold),
            ("confidence_high", self.confidence_high),
            ("confidence_medium", self.confidence_medium),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }

        let mut seen = Vec::new();
        for cat in &self.category_priority {
            if seen.contains(cat) {
                return Err(ConfigError::InvalidPriority {
                    got: self.category_priority.iter().map(|c| c.to_string()).collect(),
                });
            }
            seen.push(*cat);
        }
        if seen.len() != Category::ALL.len() {
            return Err(ConfigError::InvalidPriority {
                got: self.category_priority.iter().map(|c| c.to_string()).collect(),
            });
        }

        for sw in &self.suffix_weights {
            if sw.suffixes.iter().all(|s| s.trim().is_empty()) {
                return Err(ConfigError::EmptySuffixes {
                    category: sw.category.to_string(),
                });
            }
            if !(0.0..=1.0).contains(&sw.weight) {
                return Err(ConfigError::InvalidSuffixWeight {
                    category: sw.category.to_string(),
                    weight: sw.weight,
                });
            }
        }

        for hint in &self.context_hints {
            if hint.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeywords {
                    category: hint.category.to_string(),
                });
            }
            if !(0.0..=1.0).contains(&hint.boost) {
                return Err(ConfigError::InvalidBoost {
                    category: hint.category.to_string(),
                    boost: hint.boost,
                });
            }
        }

        for ov in &self.domain_overrides {
            if ov.term.trim().is_empty() {
                return Err(ConfigError::EmptyOverrideTerm);
            }
            if !(0.0..=1.0).contains(&ov.score) {
                return Err(ConfigError::InvalidOverrideScore {
                    term: ov.term.clone(),
                    score: ov.score,
                });
            }
        }

        Ok(())
    }

    /// The domain override for a term, matched case-insensitively.
    pub fn override_for(&self, term: &str) -> Option<&DomainOverride> {
        let needle = term.trim().to_lowercase();
        self.domain_overrides
            .iter()
            .find(|ov| ov.term.to_lowercase() == needle)
    }
}

// Tuned defaults for Dutch administrative vocabulary. A deployment
// overrides these from its own TOML; the defaults keep the classifier
// useful out of the box.
fn default_suffix_weights() -> Vec<SuffixWeight> {
    fn sw(category: Category, suffixes: &[&str], weight: f64) -> SuffixWeight {
        SuffixWeight {
            category,
            suffixes: suffixes.iter().map(|s| s.to_string()).collect(),
            weight,
        }
    }
    vec![
        sw(
            Category::Proces,
            &["ing", "atie", "procedure", "proces", "behandeling"],
            0.45,
        ),
        sw(
            Category::Resultaat,
            &[
                "besluit",
                "beschikking",
                "vergunning",
                "verklaring",
                "uitkomst",
                "rapport",
            ],
            0.50,
        ),
        sw(
            Category::Type,
            &["type", "soort", "categorie", "vorm", "klasse"],
            0.50,
        ),
        sw(
            Category::Exemplaar,
            &["nummer", "dossier", "exemplaar", "registratie"],
            0.45,
        ),
    ]
}

fn default_context_hints() -> Vec<ContextHint> {
    fn hint(
        category: Category,
        source: ContextSource,
        keywords: &[&str],
        boost: f64,
    ) -> ContextHint {
        ContextHint {
            category,
            source,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            boost,
        }
    }
    vec![
        hint(
            Category::Resultaat,
            ContextSource::Legal,
            &["besluit", "beschikking", "toekenning"],
            0.15,
        ),
        hint(
            Category::Proces,
            ContextSource::Legal,
            &["procedure", "aanvraag", "behandeling"],
            0.15,
        ),
        hint(
            Category::Proces,
            ContextSource::Statutory,
            &["procedure", "termijn"],
            0.10,
        ),
        hint(
            Category::Type,
            ContextSource::Organizational,
            &["register", "classificatie", "indeling"],
            0.10,
        ),
        hint(
            Category::Exemplaar,
            ContextSource::Organizational,
            &["dossier", "zaak", "registratie"],
            0.10,
        ),
    ]
}

use crate::category::Category;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Confidence band derived from the numeric confidence via configured
/// thresholds. The label is a pure function of the confidence value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl ConfidenceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLabel::High => "HIGH",
            ConfidenceLabel::Medium => "MEDIUM",
            ConfidenceLabel::Low => "LOW",
        }
    }
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The classifier's output: a winning category with a confidence estimate
/// and the full score breakdown for transparency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// The winning category.
    pub category: Category,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Band derived solely from `confidence`.
    pub confidence_label: ConfidenceLabel,
    /// Per-category scores, each in [0, 1].
    pub all_scores: BTreeMap<Category, f64>,
    /// True when the winner was resolved through the priority cascade —
    /// the top-two margin was below the tie-break threshold.
    pub cascade_applied: bool,
    /// True when a domain override forced the winning category's score.
    pub override_applied: bool,
}

impl ClassificationResult {
    /// Score of a given category, 0.0 when absent.
    pub fn score_for(&self, category: Category) -> f64 {
        self.all_scores.get(&category).copied().unwrap_or(0.0)
    }

    /// The winning category's score.
    pub fn winning_score(&self) -> f64 {
        self.score_for(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> ClassificationResult {
        let mut scores = BTreeMap::new();
        scores.insert(Category::Type, 0.55);
        scores.insert(Category::Proces, 0.10);
        scores.insert(Category::Resultaat, 0.20);
        scores.insert(Category::Exemplaar, 0.50);
        ClassificationResult {
            category: Category::Exemplaar,
            confidence: 0.12,
            confidence_label: ConfidenceLabel::Low,
            all_scores: scores,
            cascade_applied: true,
            override_applied: false,
        }
    }

    #[test]
    fn score_lookup() {
        let r = make_result();
        assert_eq!(r.score_for(Category::Type), 0.55);
        assert_eq!(r.winning_score(), 0.50);
    }

    #[test]
    fn result_serde_round_trip() {
        let r = make_result();
        let json = serde_json::to_string(&r).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn label_display() {
        assert_eq!(ConfidenceLabel::Medium.to_string(), "MEDIUM");
    }
}

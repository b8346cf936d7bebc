use crate::scoring::{best_other, score_categories, top_two};
use glossa_config::ClassifierConfig;
use glossa_types::{Category, ClassificationResult, ConfidenceLabel, TermContext};
use std::collections::BTreeMap;

/// Pure term classifier. All state lives in the config snapshot passed
/// to [`classify`](TermClassifier::classify); calls are safe to run
/// concurrently for independent requests.
pub struct TermClassifier;

impl TermClassifier {
    /// Classify a term in its context. Never fails: a term without any
    /// signal resolves through the cascade's fallback with LOW
    /// confidence.
    pub fn classify(context: &TermContext, config: &ClassifierConfig) -> ClassificationResult {
        let scores = score_categories(context, config);
        let override_applied = config.override_for(&context.term).is_some();

        let (winner, cascade_applied) = resolve_winner(&scores, config);
        let winner_score = scores.get(&winner).copied().unwrap_or(0.0);
        let margin = (winner_score - best_other(&scores, winner)).max(0.0);

        let confidence = compute_confidence(winner_score, margin, config);
        let confidence_label = label_for(confidence, config);

        tracing::debug!(
            term = %context.term,
            category = %winner,
            confidence,
            cascade_applied,
            override_applied,
            "term classified"
        );

        ClassificationResult {
            category: winner,
            confidence,
            confidence_label,
            all_scores: scores,
            cascade_applied,
            override_applied,
        }
    }
}

/// Pick the winning category. Returns the winner and whether the
/// priority cascade (rather than a clear margin) decided it.
pub fn resolve_winner(
    scores: &BTreeMap<Category, f64>,
    config: &ClassifierConfig,
) -> (Category, bool) {
    let (raw_winner, winner_score, runner_up_score) = top_two(scores);
    if winner_score - runner_up_score >= config.tie_break_margin {
        return (raw_winner, false);
    }

    // Too close to trust the raw ranking: first viable category in the
    // configured priority order wins.
    for candidate in &config.category_priority {
        let score = scores.get(candidate).copied().unwrap_or(0.0);
        if score >= config.viability_threshold {
            return (*candidate, true);
        }
    }

    // No category is viable; fall back to the raw highest.
    (raw_winner, true)
}

/// `confidence = winner_score × min(margin / viability_threshold, 1.0)`.
///
/// The margin is taken against the best other category, so a cascade
/// winner that out-prioritized a higher raw score gets a zero margin and
/// therefore zero confidence.
fn compute_confidence(winner_score: f64, margin: f64, config: &ClassifierConfig) -> f64 {
    let normalizer = if config.viability_threshold > 0.0 {
        config.viability_threshold
    } else {
        1.0
    };
    (winner_score * (margin / normalizer).min(1.0)).clamp(0.0, 1.0)
}

fn label_for(confidence: f64, config: &ClassifierConfig) -> ConfidenceLabel {
    if confidence >= config.confidence_high {
        ConfidenceLabel::High
    } else if confidence >= config.confidence_medium {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_config::DomainOverride;

    fn scores_of(pairs: &[(Category, f64)]) -> BTreeMap<Category, f64> {
        let mut scores: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        for (c, s) in pairs {
            scores.insert(*c, *s);
        }
        scores
    }

    // Cascade tie-break from the acceptance checklist: EXEMPLAAR=0.50,
    // TYPE=0.55, margin 0.05 < 0.15; EXEMPLAAR is first viable in the
    // priority order and wins over the raw-highest TYPE.
    #[test]
    fn cascade_prefers_priority_order_over_raw_highest() {
        let config = ClassifierConfig::default();
        let scores = scores_of(&[(Category::Exemplaar, 0.50), (Category::Type, 0.55)]);
        let (winner, cascade) = resolve_winner(&scores, &config);
        assert_eq!(winner, Category::Exemplaar);
        assert!(cascade);
    }

    #[test]
    fn clear_margin_skips_cascade() {
        let config = ClassifierConfig::default();
        let scores = scores_of(&[(Category::Proces, 0.70), (Category::Type, 0.40)]);
        let (winner, cascade) = resolve_winner(&scores, &config);
        assert_eq!(winner, Category::Proces);
        assert!(!cascade);
    }

    #[test]
    fn cascade_falls_back_to_raw_highest_when_nothing_viable() {
        let config = ClassifierConfig::default();
        let scores = scores_of(&[(Category::Proces, 0.20), (Category::Resultaat, 0.15)]);
        let (winner, cascade) = resolve_winner(&scores, &config);
        assert_eq!(winner, Category::Proces);
        assert!(cascade);
    }

    #[test]
    fn no_signal_resolves_with_low_confidence() {
        let config = ClassifierConfig::default();
        let context = TermContext::new("zzz").with_organizational("iets");
        let result = TermClassifier::classify(&context, &config);
        assert_eq!(result.confidence_label, ConfidenceLabel::Low);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.all_scores.len(), 4);
    }

    #[test]
    fn strong_suffix_with_clear_margin_is_confident() {
        let config = ClassifierConfig::default();
        let context =
            TermContext::new("soortcategorie").with_organizational("register en indeling");
        let result = TermClassifier::classify(&context, &config);
        assert_eq!(result.category, Category::Type);
        assert!(result.confidence > 0.0);
        assert!(!result.override_applied);
    }

    #[test]
    fn override_wins_with_high_confidence() {
        let config = ClassifierConfig {
            domain_overrides: vec![DomainOverride {
                term: "beschikking".into(),
                category: Category::Resultaat,
                score: 0.95,
            }],
            ..Default::default()
        };
        let context = TermContext::new("beschikking").with_legal("Awb");
        let result = TermClassifier::classify(&context, &config);
        assert_eq!(result.category, Category::Resultaat);
        assert!(result.override_applied);
        assert_eq!(result.winning_score(), 0.95);
        assert_eq!(result.confidence_label, ConfidenceLabel::High);
    }

    #[test]
    fn cascade_winner_below_raw_highest_has_zero_confidence() {
        let config = ClassifierConfig::default();
        // Build via resolve + confidence directly: EXEMPLAAR wins the
        // cascade but TYPE holds the higher raw score, so the margin
        // clamps to zero.
        let scores = scores_of(&[(Category::Exemplaar, 0.50), (Category::Type, 0.55)]);
        let (winner, _) = resolve_winner(&scores, &config);
        let margin = (scores[&winner] - best_other(&scores, winner)).max(0.0);
        assert_eq!(margin, 0.0);
    }

    #[test]
    fn confidence_formula_matches_contract() {
        let config = ClassifierConfig::default();
        // winner 0.8, margin 0.15 → 0.8 * (0.15 / 0.30) = 0.4
        let c = compute_confidence(0.8, 0.15, &config);
        assert!((c - 0.4).abs() < 1e-9);
        // margin saturates at the normalizer
        let c = compute_confidence(0.8, 0.9, &config);
        assert!((c - 0.8).abs() < 1e-9);
    }

    #[test]
    fn labels_follow_configured_thresholds() {
        let config = ClassifierConfig::default();
        assert_eq!(label_for(0.70, &config), ConfidenceLabel::High);
        assert_eq!(label_for(0.69, &config), ConfidenceLabel::Medium);
        assert_eq!(label_for(0.45, &config), ConfidenceLabel::Medium);
        assert_eq!(label_for(0.44, &config), ConfidenceLabel::Low);
    }

    // Determinism: repeated classification of the same input yields the
    // identical result.
    #[test]
    fn classification_is_deterministic() {
        let config = ClassifierConfig::default();
        let context = TermContext::new("omgevingsvergunning")
            .with_legal("Omgevingswet")
            .with_organizational("afdeling vergunningen");
        let first = TermClassifier::classify(&context, &config);
        for _ in 0..5 {
            assert_eq!(TermClassifier::classify(&context, &config), first);
        }
    }
}

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Every input resolves: four bounded scores, bounded confidence,
        // and the same result on every call.
        #[test]
        fn classify_total_and_deterministic(
            term in "[a-zA-Z][a-zA-Z ]{0,30}",
            legal in "[a-zA-Z ]{1,30}",
        ) {
            let config = ClassifierConfig::default();
            let context = TermContext::new(term).with_legal(legal);
            let result = TermClassifier::classify(&context, &config);

            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert_eq!(result.all_scores.len(), 4);
            for score in result.all_scores.values() {
                prop_assert!((0.0..=1.0).contains(score));
            }
            prop_assert_eq!(TermClassifier::classify(&context, &config), result);
        }
    }
}

use glossa_config::{ClassifierConfig, ContextSource};
use glossa_types::{Category, TermContext};
use std::collections::{BTreeMap, BTreeSet};

/// Compute the per-category base scores for a term in its context.
///
/// Suffix evidence: the strongest matching suffix entry per category
/// sets the base. Context evidence: each hint whose keyword occurs in
/// the hinted context set adds its boost once. Scores are clamped to
/// [0, 1]. Domain overrides then force the curated category's score;
/// the other categories keep their computed values.
pub fn score_categories(context: &TermContext, config: &ClassifierConfig) -> BTreeMap<Category, f64> {
    let term = context.term.trim().to_lowercase();
    let mut scores: BTreeMap<Category, f64> =
        Category::ALL.iter().map(|c| (*c, 0.0)).collect();

    for entry in &config.suffix_weights {
        let matched = entry
            .suffixes
            .iter()
            .any(|suffix| !suffix.is_empty() && term.ends_with(&suffix.to_lowercase()));
        if matched {
            let slot = scores.entry(entry.category).or_insert(0.0);
            if entry.weight > *slot {
                *slot = entry.weight;
            }
        }
    }

    for hint in &config.context_hints {
        let set = source_set(context, hint.source);
        let matched = hint.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            !keyword.is_empty()
                && set
                    .iter()
                    .any(|entry| entry.to_lowercase().contains(&keyword))
        });
        if matched {
            let slot = scores.entry(hint.category).or_insert(0.0);
            *slot = (*slot + hint.boost).clamp(0.0, 1.0);
        }
    }

    if let Some(ov) = config.override_for(&context.term) {
        scores.insert(ov.category, ov.score);
    }

    scores
}

fn source_set(context: &TermContext, source: ContextSource) -> &BTreeSet<String> {
    match source {
        ContextSource::Organizational => &context.organizational_context,
        ContextSource::Legal => &context.legal_context,
        ContextSource::Statutory => &context.statutory_basis,
    }
}

/// The top two entries of a score map: (winner, winner_score,
/// runner_up_score). Ties resolve to the earlier category in declaration
/// order, which keeps the result deterministic.
pub fn top_two(scores: &BTreeMap<Category, f64>) -> (Category, f64, f64) {
    let mut ranked: Vec<(Category, f64)> = scores.iter().map(|(c, s)| (*c, *s)).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let (winner, winner_score) = ranked[0];
    let runner_up_score = ranked.get(1).map(|(_, s)| *s).unwrap_or(0.0);
    (winner, winner_score, runner_up_score)
}

/// Highest score among categories other than `winner`.
pub fn best_other(scores: &BTreeMap<Category, f64>, winner: Category) -> f64 {
    scores
        .iter()
        .filter(|(c, _)| **c != winner)
        .map(|(_, s)| *s)
        .fold(0.0, f64::max)
}

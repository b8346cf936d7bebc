use crate::module::{deps, PromptContext, PromptModule};
use std::collections::BTreeSet;

/// States the term under definition and how it was classified.
pub struct TermModule;

impl PromptModule for TermModule {
    fn module_id(&self) -> &str {
        "term"
    }

    fn priority(&self) -> i32 {
        90
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["role"])
    }

    fn execute(&self, context: &PromptContext) -> String {
        format!(
            "## Term\n{}\n\nClassified as {} ({} confidence).",
            context.term(),
            context.classification.category,
            context.classification.confidence_label,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::{Category, ClassificationResult, ConfidenceLabel, TermContext};
    use std::collections::BTreeMap;

    #[test]
    fn names_term_and_classification() {
        let scores: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        let ctx = PromptContext::new(
            TermContext::new("beschikking").with_legal("Awb"),
            ClassificationResult {
                category: Category::Resultaat,
                confidence: 0.8,
                confidence_label: ConfidenceLabel::High,
                all_scores: scores,
                cascade_applied: false,
                override_applied: true,
            },
        );
        let out = TermModule.execute(&ctx);
        assert!(out.contains("beschikking"));
        assert!(out.contains("RESULTAAT"));
        assert!(out.contains("HIGH"));
    }
}

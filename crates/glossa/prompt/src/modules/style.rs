use crate::module::{deps, PromptContext, PromptModule};
use std::collections::BTreeSet;

/// Definition style constraints. These mirror the validation catalog so
/// the generator is told up front what the scorer will check afterwards.
pub struct StyleRulesModule;

impl PromptModule for StyleRulesModule {
    fn module_id(&self) -> &str {
        "style_rules"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["category_guidance"])
    }

    fn execute(&self, _context: &PromptContext) -> String {
        let mut prompt = String::from("## Style\n");
        prompt.push_str("- One sentence of 5 to 45 words.\n");
        prompt.push_str("- Open with an article and the broader concept (genus).\n");
        prompt.push_str("- Do not repeat the term inside its own definition.\n");
        prompt.push_str(
            "- No meta phrases (\"is een begrip\", \"wordt verstaan onder\", \"betekent dat\").\n",
        );
        prompt.push_str("- No direct address, no enumerations, no trailing examples.");
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::{Category, ClassificationResult, ConfidenceLabel, TermContext};
    use std::collections::BTreeMap;

    #[test]
    fn style_rules_mention_the_catalog_constraints() {
        let scores: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|c| (*c, 0.0)).collect();
        let ctx = PromptContext::new(
            TermContext::new("t").with_legal("w"),
            ClassificationResult {
                category: Category::Type,
                confidence: 0.5,
                confidence_label: ConfidenceLabel::Medium,
                all_scores: scores,
                cascade_applied: false,
                override_applied: false,
            },
        );
        let out = StyleRulesModule.execute(&ctx);
        assert!(out.contains("One sentence"));
        assert!(out.contains("genus"));
        assert!(out.contains("is een begrip"));
    }
}

//! The standard module set for definition generation.
//!
//! Eight modules cover the generation instruction: role, term, category
//! guidance, the three context renderings, style rules, and the output
//! contract. Callers may extend the set with their own
//! [`PromptModule`](crate::PromptModule) implementations; the
//! orchestrator treats them uniformly.

mod category;
mod context;
mod format;
mod role;
mod style;
mod term;

pub use category::CategoryGuidanceModule;
pub use context::{LegalContextModule, OrganisationalContextModule, StatutoryBasisModule};
pub use format::FormatContractModule;
pub use role::RoleModule;
pub use style::StyleRulesModule;
pub use term::TermModule;

use crate::module::PromptModule;

/// The full standard module set, in no particular order — the
/// orchestrator derives the emission order from the declared graph.
pub fn standard_modules() -> Vec<Box<dyn PromptModule>> {
    vec![
        Box::new(RoleModule),
        Box::new(TermModule),
        Box::new(CategoryGuidanceModule),
        Box::new(OrganisationalContextModule),
        Box::new(LegalContextModule),
        Box::new(StatutoryBasisModule),
        Box::new(StyleRulesModule),
        Box::new(FormatContractModule),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::PromptContext;
    use crate::orchestrator::PromptOrchestrator;
    use glossa_types::{Category, ClassificationResult, ConfidenceLabel, TermContext};
    use std::collections::BTreeMap;

    fn make_context(category: Category) -> PromptContext {
        let scores: BTreeMap<Category, f64> =
            Category::ALL.iter().map(|c| (*c, 0.25)).collect();
        PromptContext::new(
            TermContext::new("omgevingsvergunning")
                .with_legal("Omgevingswet")
                .with_statutory("artikel 2.1 Omgevingswet"),
            ClassificationResult {
                category,
                confidence: 0.6,
                confidence_label: ConfidenceLabel::Medium,
                all_scores: scores,
                cascade_applied: false,
                override_applied: false,
            },
        )
    }

    #[test]
    fn standard_set_composes_in_stable_order() {
        let modules = standard_modules();
        let artifact =
            PromptOrchestrator::compose(&modules, &make_context(Category::Resultaat)).unwrap();
        assert_eq!(
            artifact.manifest,
            vec![
                "role",
                "term",
                "category_guidance",
                "legal_context",
                "organisational_context",
                "statutory_basis",
                "style_rules",
                "format_contract",
            ]
        );
    }

    #[test]
    fn rendered_instruction_names_the_term() {
        let modules = standard_modules();
        let artifact =
            PromptOrchestrator::compose(&modules, &make_context(Category::Resultaat)).unwrap();
        let text = artifact.rendered();
        assert!(text.contains("omgevingsvergunning"));
        assert!(text.contains("Omgevingswet"));
    }

    #[test]
    fn category_guidance_tracks_classification() {
        let modules = standard_modules();
        for category in Category::ALL {
            let artifact =
                PromptOrchestrator::compose(&modules, &make_context(category)).unwrap();
            let section = artifact.section("category_guidance").unwrap();
            assert!(
                section.content.contains(category.as_str()),
                "guidance for {category} must name the category"
            );
        }
    }

    #[test]
    fn empty_context_sets_stay_in_manifest_but_render_nothing() {
        let modules = standard_modules();
        let ctx = PromptContext::new(
            TermContext::new("besluit").with_legal("Awb"),
            make_context(Category::Resultaat).classification,
        );
        let artifact = PromptOrchestrator::compose(&modules, &ctx).unwrap();
        let section = artifact.section("organisational_context").unwrap();
        assert!(section.is_empty());
        assert!(artifact.manifest.contains(&"organisational_context".to_string()));
        assert!(!artifact.rendered().contains("Organisational context"));
    }
}

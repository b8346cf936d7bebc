use crate::module::{deps, PromptContext, PromptModule};
use glossa_types::Category;
use std::collections::BTreeSet;

/// Category-specific definition guidance: the shape a definition takes
/// depends on whether the term names a kind, an activity, an outcome, or
/// an instance.
pub struct CategoryGuidanceModule;

impl PromptModule for CategoryGuidanceModule {
    fn module_id(&self) -> &str {
        "category_guidance"
    }

    fn priority(&self) -> i32 {
        80
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["term"])
    }

    fn execute(&self, context: &PromptContext) -> String {
        let category = context.classification.category;
        let guidance = match category {
            Category::Type => {
                "The term names a kind of thing. Define it genus-first: name the \
                 broader class it belongs to, then give the characteristics that \
                 separate it from the other members of that class. Do not describe \
                 individual occurrences."
            }
            Category::Proces => {
                "The term names an activity. Define it as a course of action: who \
                 performs it, on what, and with what intended effect. Describe the \
                 activity itself, not the outcome it produces."
            }
            Category::Resultaat => {
                "The term names an outcome. Define what is established, granted, or \
                 recorded, and name the activity that brings it about. The outcome \
                 is the thing, not the procedure that led to it."
            }
            Category::Exemplaar => {
                "The term names a concrete instance. Define it by pointing at the \
                 kind it instantiates and the attributes that identify this \
                 particular occurrence."
            }
        };
        format!("## Guidance ({category})\n{guidance}")
    }
}

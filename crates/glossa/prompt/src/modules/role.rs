use crate::module::{PromptContext, PromptModule};

/// Opens the instruction: who the generator is and what one thing it
/// must produce.
pub struct RoleModule;

impl PromptModule for RoleModule {
    fn module_id(&self) -> &str {
        "role"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn execute(&self, _context: &PromptContext) -> String {
        let mut prompt = String::new();
        prompt.push_str(
            "You are a terminologist writing definitions for Dutch administrative vocabulary.\n",
        );
        prompt.push_str(
            "Produce exactly one definition for the term below, suitable for a published glossary.",
        );
        prompt
    }
}

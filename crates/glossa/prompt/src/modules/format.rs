use crate::module::{deps, PromptContext, PromptModule};
use std::collections::BTreeSet;

/// Closes the instruction with the output contract.
pub struct FormatContractModule;

impl PromptModule for FormatContractModule {
    fn module_id(&self) -> &str {
        "format_contract"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["style_rules"])
    }

    fn execute(&self, _context: &PromptContext) -> String {
        "## Output\nReturn only the definition text: no preamble, no quotation marks, \
         no explanation after the sentence."
            .to_string()
    }
}

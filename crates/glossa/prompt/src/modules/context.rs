use crate::module::{deps, PromptContext, PromptModule};
use std::collections::BTreeSet;

fn render_set(heading: &str, entries: &BTreeSet<String>) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = format!("## {heading}\n");
    for entry in entries {
        out.push_str("- ");
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Renders the organizational context set. Empty set, empty fragment.
pub struct OrganisationalContextModule;

impl PromptModule for OrganisationalContextModule {
    fn module_id(&self) -> &str {
        "organisational_context"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["term"])
    }

    fn execute(&self, context: &PromptContext) -> String {
        render_set(
            "Organisational context",
            &context.term_context.organizational_context,
        )
    }
}

/// Renders the legal context set.
pub struct LegalContextModule;

impl PromptModule for LegalContextModule {
    fn module_id(&self) -> &str {
        "legal_context"
    }

    fn priority(&self) -> i32 {
        60
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["term"])
    }

    fn execute(&self, context: &PromptContext) -> String {
        render_set("Legal context", &context.term_context.legal_context)
    }
}

/// Renders the statutory basis, after the legal context it grounds.
pub struct StatutoryBasisModule;

impl PromptModule for StatutoryBasisModule {
    fn module_id(&self) -> &str {
        "statutory_basis"
    }

    fn priority(&self) -> i32 {
        55
    }

    fn dependencies(&self) -> BTreeSet<String> {
        deps(&["legal_context"])
    }

    fn execute(&self, context: &PromptContext) -> String {
        render_set("Statutory basis", &context.term_context.statutory_basis)
    }
}

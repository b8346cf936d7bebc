use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ── Module Output ────────────────────────────────────────────────────

/// One module's contribution to a composed prompt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleOutput {
    /// Stable identifier of the contributing module.
    pub module_id: String,
    /// The content fragment. May be empty when the module had nothing to
    /// say for this context; empty fragments are kept in the manifest but
    /// skipped when rendering.
    pub content: String,
    /// Ordering weight among modules that become ready at the same
    /// topological step. Higher emits first.
    pub priority: i32,
    /// Module ids this fragment must come after.
    pub dependencies: BTreeSet<String>,
    /// Size estimate in bytes of the fragment.
    pub estimated_size: usize,
}

impl ModuleOutput {
    pub fn new(
        module_id: impl Into<String>,
        content: impl Into<String>,
        priority: i32,
        dependencies: BTreeSet<String>,
    ) -> Self {
        let content = content.into();
        Self {
            module_id: module_id.into(),
            estimated_size: content.len(),
            content,
            priority,
            dependencies,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

// ── Composed Artifact ────────────────────────────────────────────────

/// The final generation instruction: module fragments in emission order
/// plus provenance metadata.
///
/// The emission order respects a topological sort of the declared
/// dependencies; ties are broken by priority (higher first), then by
/// lexicographic module id, so the artifact is reproducible across runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposedArtifact {
    /// Fragments in emission order.
    pub sections: Vec<ModuleOutput>,
    /// Module ids in emission order.
    pub manifest: Vec<String>,
    /// Sum of the section size estimates.
    pub total_estimated_size: usize,
}

impl ComposedArtifact {
    /// Build an artifact from sections already in emission order.
    pub fn from_sections(sections: Vec<ModuleOutput>) -> Self {
        let manifest = sections.iter().map(|s| s.module_id.clone()).collect();
        let total_estimated_size = sections.iter().map(|s| s.estimated_size).sum();
        Self {
            sections,
            manifest,
            total_estimated_size,
        }
    }

    /// Render the final instruction text. Empty fragments are skipped so
    /// the output carries no blank sections.
    pub fn rendered(&self) -> String {
        self.sections
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.content.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn section(&self, module_id: &str) -> Option<&ModuleOutput> {
        self.sections.iter().find(|s| s.module_id == module_id)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

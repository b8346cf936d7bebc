use glossa_types::{Severity, ValidationResult};

/// Builds the follow-up instruction after a rejection: the violations,
/// ordered most severe first, rendered into a revision request the
/// caller can feed back into its generator.
pub struct RevisionPromptBuilder;

impl RevisionPromptBuilder {
    pub fn build(validation: &ValidationResult, original_text: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str("The definition below scored ");
        prompt.push_str(&format!("{:.2}", validation.overall_score));
        prompt.push_str(" and was rejected. Rewrite it so every finding is resolved.\n\n");

        prompt.push_str("## Definition\n");
        prompt.push_str(original_text.trim());
        prompt.push_str("\n\n## Findings\n");

        for severity in [Severity::Error, Severity::Warning, Severity::Info] {
            for violation in validation.violations_at(severity) {
                prompt.push_str(&format!(
                    "- [{}] {}: {}\n",
                    severity, violation.rule_id, violation.message
                ));
                if let Some(suggestion) = &violation.suggestion {
                    prompt.push_str(&format!("  Suggestion: {suggestion}\n"));
                }
            }
        }

        prompt.push_str(
            "\nReturn only the rewritten definition text, nothing else.",
        );
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::RuleResult;
    use std::collections::BTreeMap;

    fn make_validation() -> ValidationResult {
        ValidationResult {
            overall_score: 0.47,
            category_scores: BTreeMap::new(),
            violations: vec![
                RuleResult::fail("CON-001", Severity::Warning, 0.0, "not anchored to an actor"),
                RuleResult::fail(
                    "ESS-001",
                    Severity::Error,
                    0.0,
                    "must open with a genus",
                )
                .with_suggestion("start with 'een <broader concept>'"),
            ],
            passed_rules: vec!["TAAL-002".to_string()],
            catalog_version: "2024.1".to_string(),
        }
    }

    #[test]
    fn findings_ordered_most_severe_first() {
        let prompt = RevisionPromptBuilder::build(&make_validation(), "Dit begrip mag.");
        let error_pos = prompt.find("ESS-001").unwrap();
        let warning_pos = prompt.find("CON-001").unwrap();
        assert!(error_pos < warning_pos);
    }

    #[test]
    fn prompt_carries_text_score_and_suggestions() {
        let prompt = RevisionPromptBuilder::build(&make_validation(), "Dit begrip mag.");
        assert!(prompt.contains("Dit begrip mag."));
        assert!(prompt.contains("0.47"));
        assert!(prompt.contains("Suggestion: start with"));
        assert!(prompt.contains("Return only the rewritten definition"));
    }

    #[test]
    fn passed_rules_do_not_appear() {
        let prompt = RevisionPromptBuilder::build(&make_validation(), "x");
        assert!(!prompt.contains("TAAL-002"));
    }
}

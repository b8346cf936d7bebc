use crate::checks::{evaluate_builtin, CheckError};
use glossa_config::{Detection, RuleCatalog, ValidationRule};
use glossa_types::{round2, RuleResult, Severity, ValidationResult};
use std::collections::BTreeMap;

/// A caller-supplied rule evaluated alongside the catalog, mirroring the
/// declarative rule surface: id, category, weight, and an evaluation
/// hook. An `Err` from `evaluate` is contained exactly like a broken
/// built-in check.
pub trait CustomCheck: Send + Sync {
    fn id(&self) -> &str;
    fn category(&self) -> &str;
    fn weight(&self) -> f64;
    fn severity(&self) -> Severity {
        Severity::Warning
    }
    fn message(&self) -> &str;
    /// Returns (passed, score, message).
    fn evaluate(&self, text: &str) -> Result<(bool, f64, String), CheckError>;
}

/// Scores definition texts against one immutable catalog snapshot.
pub struct ValidationScorer<'a> {
    catalog: &'a RuleCatalog,
    subject: Option<String>,
    custom_rules: Vec<Box<dyn CustomCheck>>,
}

/// Score a text against a catalog with no subject term and no custom
/// rules. Checks that need the subject report their failure per rule.
pub fn score(text: &str, catalog: &RuleCatalog) -> ValidationResult {
    ValidationScorer::new(catalog).score(text)
}

impl<'a> ValidationScorer<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            catalog,
            subject: None,
            custom_rules: Vec::new(),
        }
    }

    /// The term under definition, consulted by subject-aware built-in
    /// checks (circularity, term echo).
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_custom_rule(mut self, rule: Box<dyn CustomCheck>) -> Self {
        self.custom_rules.push(rule);
        self
    }

    /// Evaluate every rule independently and aggregate.
    ///
    /// Overall score is the weight-normalized mean over all evaluated
    /// rules, rounded to two decimals; category scores are unweighted
    /// means within each rule category.
    pub fn score(&self, text: &str) -> ValidationResult {
        // Evaluate everything first, aggregate after; each entry is
        // (category, weight, result).
        let mut evaluated: Vec<(String, f64, RuleResult)> = Vec::new();
        for rule in self.catalog.rules() {
            evaluated.push((
                rule.category.clone(),
                rule.weight,
                self.evaluate_rule(rule, text),
            ));
        }
        for custom in &self.custom_rules {
            evaluated.push((
                custom.category().to_string(),
                custom.weight(),
                evaluate_custom(custom.as_ref(), text),
            ));
        }

        let mut violations = Vec::new();
        let mut passed_rules = Vec::new();
        let mut by_category: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (category, weight, result) in evaluated {
            weighted_sum += weight * result.score;
            weight_total += weight;
            by_category.entry(category).or_default().push(result.score);
            if result.passed {
                passed_rules.push(result.rule_id);
            } else {
                violations.push(result);
            }
        }

        let overall_score = if weight_total > 0.0 {
            round2(weighted_sum / weight_total)
        } else {
            // An empty catalog has nothing to violate.
            1.0
        };

        let category_scores = by_category
            .into_iter()
            .map(|(category, scores)| {
                let mean = scores.iter().sum::<f64>() / scores.len() as f64;
                (category, mean)
            })
            .collect();

        tracing::debug!(
            catalog_version = %self.catalog.version,
            overall_score,
            violations = violations.len(),
            "definition scored"
        );

        ValidationResult {
            overall_score,
            category_scores,
            violations,
            passed_rules,
            catalog_version: self.catalog.version.clone(),
        }
    }

    fn evaluate_rule(&self, rule: &ValidationRule, text: &str) -> RuleResult {
        match &rule.detection {
            Detection::Patterns {
                positive,
                negative,
                partial,
            } => evaluate_patterns(rule, text, positive, negative, *partial),
            Detection::Builtin(check) => {
                match evaluate_builtin(check, text, self.subject.as_deref()) {
                    Ok(outcome) if outcome.passed => {
                        RuleResult::pass(&rule.id, rule.severity, &rule.message)
                    }
                    Ok(outcome) => {
                        let message = match outcome.detail {
                            Some(detail) => format!("{}: {detail}", rule.message),
                            None => rule.message.clone(),
                        };
                        let mut result =
                            RuleResult::fail(&rule.id, rule.severity, outcome.score, message);
                        if let Some(suggestion) = &rule.suggestion {
                            result = result.with_suggestion(suggestion);
                        }
                        result
                    }
                    // A check that cannot evaluate fails this rule and
                    // only this rule.
                    Err(err) => RuleResult::fail(
                        &rule.id,
                        rule.severity,
                        0.0,
                        format!("rule evaluation failed: {err}"),
                    ),
                }
            }
        }
    }
}

fn evaluate_patterns(
    rule: &ValidationRule,
    text: &str,
    positive: &[regex::Regex],
    negative: &[regex::Regex],
    partial: bool,
) -> RuleResult {
    if let Some(hit) = negative.iter().find(|re| re.is_match(text)) {
        let mut result = RuleResult::fail(
            &rule.id,
            rule.severity,
            0.0,
            format!("{}: matched {:?}", rule.message, hit.as_str()),
        );
        if let Some(suggestion) = &rule.suggestion {
            result = result.with_suggestion(suggestion);
        }
        return result;
    }

    let matched = positive.iter().filter(|re| re.is_match(text)).count();
    if matched == positive.len() {
        return RuleResult::pass(&rule.id, rule.severity, &rule.message);
    }

    let score = if partial && !positive.is_empty() {
        matched as f64 / positive.len() as f64
    } else {
        0.0
    };
    let mut result = RuleResult::fail(&rule.id, rule.severity, score, &rule.message);
    if let Some(suggestion) = &rule.suggestion {
        result = result.with_suggestion(suggestion);
    }
    result
}

fn evaluate_custom(rule: &dyn CustomCheck, text: &str) -> RuleResult {
    match rule.evaluate(text) {
        Ok((true, _, message)) => RuleResult {
            rule_id: rule.id().to_string(),
            passed: true,
            score: 1.0,
            message,
            severity: rule.severity(),
            suggestion: None,
        },
        Ok((false, score, message)) => RuleResult::fail(rule.id(), rule.severity(), score, message),
        Err(err) => RuleResult::fail(
            rule.id(),
            rule.severity(),
            0.0,
            format!("rule evaluation failed: {err}"),
        ),
    }
}

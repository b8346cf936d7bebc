use crate::error::GateError;
use glossa_config::AcceptancePolicy;
use glossa_types::{GateDecision, GateState, ValidationResult};
use std::collections::BTreeMap;

/// Caller-supplied facts about the surrounding record: whether a usage
/// example exists, whether a source is linked, and so on. The gate only
/// consults them when persistence is requested.
#[derive(Clone, Debug, Default)]
pub struct CompletenessFacts {
    facts: BTreeMap<String, bool>,
    persistence_requested: bool,
}

impl CompletenessFacts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fact(mut self, name: impl Into<String>, satisfied: bool) -> Self {
        self.facts.insert(name.into(), satisfied);
        self
    }

    pub fn persistence_requested(mut self) -> Self {
        self.persistence_requested = true;
        self
    }

    pub fn is_satisfied(&self, name: &str) -> bool {
        self.facts.get(name).copied().unwrap_or(false)
    }
}

/// Authorization for a force-accept. Issued by the surrounding
/// application; the gate only checks that it was granted.
#[derive(Clone, Debug)]
pub struct OverrideAuthorization {
    pub actor: String,
    authorized: bool,
}

impl OverrideAuthorization {
    pub fn granted(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            authorized: true,
        }
    }

    pub fn denied(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            authorized: false,
        }
    }
}

/// Decides accept/reject over one [`ValidationResult`] against one
/// immutable policy snapshot. Pure; safe to call concurrently.
pub struct AcceptanceGate<'a> {
    policy: &'a AcceptancePolicy,
}

impl<'a> AcceptanceGate<'a> {
    pub fn new(policy: &'a AcceptancePolicy) -> Self {
        Self { policy }
    }

    /// Evaluate the acceptance conjunction. Every failing condition is
    /// named in the returned decision's `reasons`.
    pub fn decide(
        &self,
        validation: &ValidationResult,
        facts: &CompletenessFacts,
    ) -> GateDecision {
        let mut reasons = Vec::new();

        if validation.overall_score < self.policy.threshold {
            reasons.push(format!(
                "overall score {:.2} below threshold {:.2}",
                validation.overall_score, self.policy.threshold
            ));
        }

        for (category, minimum) in &self.policy.category_minimums {
            match validation.category_score(category) {
                Some(score) if score >= *minimum => {}
                Some(score) => {
                    reasons.push(format!(
                        "{category} below minimum ({score:.2} < {minimum:.2})"
                    ));
                }
                None => {
                    reasons.push(format!(
                        "{category} below minimum (no rules evaluated)"
                    ));
                }
            }
        }

        if facts.persistence_requested {
            for fact in &self.policy.required_facts {
                if !facts.is_satisfied(fact) {
                    reasons.push(format!("completeness fact {fact:?} not satisfied"));
                }
            }
        }

        let decision = if reasons.is_empty() {
            GateDecision::accepted()
        } else {
            GateDecision::rejected(reasons)
        };

        tracing::info!(
            acceptable = decision.is_acceptable,
            reasons = decision.reasons.len(),
            catalog_version = %validation.catalog_version,
            "gate decided"
        );
        decision
    }

    /// The only `Rejected → ForceAccepted` transition. Requires a granted
    /// authorization and a non-empty reason; the override reason is
    /// recorded alongside the original rejection reasons.
    pub fn force_accept(
        &self,
        decision: &GateDecision,
        authorization: &OverrideAuthorization,
        reason: &str,
    ) -> Result<GateDecision, GateError> {
        if decision.state != GateState::Rejected {
            return Err(GateError::InvalidTransition {
                from: decision.state,
            });
        }
        if !authorization.authorized {
            return Err(GateError::OverrideNotAuthorized {
                actor: authorization.actor.clone(),
            });
        }
        if reason.trim().is_empty() {
            return Err(GateError::MissingOverrideReason);
        }

        let mut reasons = decision.reasons.clone();
        reasons.push(format!(
            "force-accepted by {}: {}",
            authorization.actor, reason
        ));

        tracing::info!(actor = %authorization.actor, "rejection force-accepted");

        Ok(GateDecision {
            is_acceptable: true,
            reasons,
            overridden: true,
            state: GateState::ForceAccepted,
        })
    }
}

use serde::{Deserialize, Serialize};

/// Gate lifecycle. A decision starts `Pending`, becomes `Scored` once a
/// validation result exists, then resolves to `Accepted` or `Rejected`.
/// `ForceAccepted` is a terminal state reachable only from `Rejected`
/// through a separately authorized override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    Pending,
    Scored,
    Accepted,
    Rejected,
    ForceAccepted,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GateState::Accepted | GateState::ForceAccepted
        )
    }
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GateState::Pending => "pending",
            GateState::Scored => "scored",
            GateState::Accepted => "accepted",
            GateState::Rejected => "rejected",
            GateState::ForceAccepted => "force_accepted",
        };
        write!(f, "{s}")
    }
}

/// The gate's output: the system's primary externally observable
/// contract. Every failing condition is reported by name in `reasons`,
/// never as a bare boolean.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub is_acceptable: bool,
    /// Named conditions: which threshold, category, or fact failed; or
    /// the override reason after a force-accept.
    pub reasons: Vec<String>,
    /// True only after an authorized `Rejected → ForceAccepted`
    /// transition.
    pub overridden: bool,
    pub state: GateState,
}

impl GateDecision {
    pub fn accepted() -> Self {
        Self {
            is_acceptable: true,
            reasons: Vec::new(),
            overridden: false,
            state: GateState::Accepted,
        }
    }

    pub fn rejected(reasons: Vec<String>) -> Self {
        Self {
            is_acceptable: false,
            reasons,
            overridden: false,
            state: GateState::Rejected,
        }
    }
}
